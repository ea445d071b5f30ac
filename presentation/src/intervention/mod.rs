pub mod human_intervention;
