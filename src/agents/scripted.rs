//! Test double for `LanguageModel`

use color_eyre::Result;
use std::cell::RefCell;

use crate::agents::{CompletionRequest, LanguageModel};

/// Replays a fixed reply (or failure) and records the requests it saw
pub struct ScriptedModel {
    reply: Result<String, String>,
    seen: RefCell<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            seen: RefCell::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.borrow().clone()
    }
}

impl LanguageModel for ScriptedModel {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.seen.borrow_mut().push(request.clone());
        self.reply
            .clone()
            .map_err(|error| color_eyre::eyre::eyre!(error))
    }
}
