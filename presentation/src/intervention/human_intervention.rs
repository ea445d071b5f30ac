//! Interactive clinician answers for chair questions.
//!
//! When the chair asks the attending clinician a question, the run suspends
//! and the user sees:
//!
//! ```text
//! The chair is asking the attending clinician:
//!   Has the patient travelled in the last month?
//!
//! clinician> Yes, to Kenya, back 9 days ago
//! Add hypotheses as `name, probability[, justification]` (empty line to finish)
//! hypothesis> Malaria, 45, travel to an endemic area
//! hypothesis>
//! ```
//!
//! End of input (Ctrl-D) at the answer prompt abandons the run.

use colored::Colorize;
use council_application::{InterventionResponder, ProgressSink};
use council_domain::{Hypothesis, HumanReply, ProgressEvent};
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

const DEFAULT_JUSTIFICATION: &str = "Raised by the attending clinician";

type SharedResponder = Arc<Mutex<Option<InterventionResponder>>>;

/// Progress sink that forwards every event to `inner` and, on
/// `AwaitingInput`, reads the clinician's answer from stdin.
///
/// The reader runs on the blocking pool so the run task keeps waiting on the
/// gate rather than on the terminal. The caller should hand over its only
/// responder: when stdin closes the responder is dropped, which closes the
/// gate.
pub struct ConsoleClinician<'a> {
    inner: &'a dyn ProgressSink,
    responder: SharedResponder,
}

impl<'a> ConsoleClinician<'a> {
    pub fn new(inner: &'a dyn ProgressSink, responder: InterventionResponder) -> Self {
        Self {
            inner,
            responder: Arc::new(Mutex::new(Some(responder))),
        }
    }

    fn spawn_prompt(&self) {
        let responder = Arc::clone(&self.responder);
        let task = move || {
            let stdin = io::stdin();
            let reply = read_reply(&mut stdin.lock(), &mut io::stderr());
            deliver(&responder, reply);
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(task);
            }
            Err(_) => task(),
        }
    }
}

impl ProgressSink for ConsoleClinician<'_> {
    fn emit(&self, event: ProgressEvent) {
        let asking = matches!(event, ProgressEvent::AwaitingInput { .. });
        self.inner.emit(event);
        if asking {
            self.spawn_prompt();
        }
    }
}

fn deliver(responder: &SharedResponder, reply: io::Result<Option<HumanReply>>) {
    let mut slot = responder.lock().unwrap_or_else(|e| e.into_inner());
    match reply {
        Ok(Some(reply)) => {
            let Some(responder) = slot.as_ref() else {
                return;
            };
            if let Err(e) = responder.answer(reply) {
                warn!("Clinician answer was not delivered: {}", e);
            }
        }
        Ok(None) => {
            debug!("stdin closed; releasing the intervention channel");
            slot.take();
        }
        Err(e) => {
            warn!("Could not read the clinician answer: {}", e);
            slot.take();
        }
    }
}

/// Read one answer plus optional hypotheses. `Ok(None)` on end of input
/// before an answer was given.
pub fn read_reply(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<Option<HumanReply>> {
    let answer = loop {
        write!(out, "{} ", "clinician>".magenta().bold())?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if !line.is_empty() {
            break line;
        }
    };

    let mut reply = HumanReply::new(answer);
    writeln!(
        out,
        "{}",
        "Add hypotheses as `name, probability[, justification]` (empty line to finish)".dimmed()
    )?;
    loop {
        write!(out, "{} ", "hypothesis>".magenta())?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            break;
        };
        if line.is_empty() {
            break;
        }
        match parse_hypothesis(&line) {
            Ok(hypothesis) => reply = reply.with_hypothesis(hypothesis),
            Err(msg) => writeln!(out, "{} {}", "!".yellow(), msg)?,
        }
    }
    Ok(Some(reply))
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Parse `name, probability[, justification]`; a trailing `%` is allowed.
pub fn parse_hypothesis(line: &str) -> Result<Hypothesis, String> {
    let mut parts = line.splitn(3, ',').map(str::trim);
    let name = parts.next().filter(|n| !n.is_empty()).ok_or("missing name")?;
    let probability = parts
        .next()
        .ok_or_else(|| format!("missing probability for {}", name))?
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("probability for {} is not a number", name))?;
    if !(0.0..=100.0).contains(&probability) {
        return Err(format!("probability for {} must be between 0 and 100", name));
    }
    let justification = parts
        .next()
        .filter(|j| !j.is_empty())
        .unwrap_or(DEFAULT_JUSTIFICATION);
    Ok(Hypothesis::new(name, probability, justification))
}
