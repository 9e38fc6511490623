use crate::{
    builder::{Builder, BuilderRef},
    endpoint::{PRIORITY_DEFAULT, SearchEndpoint},
    error::Error,
    key,
    resolve::ResolutionContext,
};
use serde_json::Value;

///
/// HighlightEndpoint
///
/// Single-valued section: exactly one highlight builder; a second add
/// overflows.
///

#[derive(Clone, Default)]
pub struct HighlightEndpoint {
    entry: Option<(String, BuilderRef)>,
}

impl HighlightEndpoint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn highlight(&self) -> Option<&BuilderRef> {
        self.entry.as_ref().map(|(_, builder)| builder)
    }
}

impl SearchEndpoint for HighlightEndpoint {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn priority(&self) -> u8 {
        PRIORITY_DEFAULT
    }

    fn add(&mut self, builder: BuilderRef, endpoint_key: Option<String>) -> Result<String, Error> {
        if self.entry.is_some() {
            return Err(Error::HighlightOverflow);
        }

        let endpoint_key = endpoint_key.unwrap_or_else(key::generate);
        self.entry = Some((endpoint_key.clone(), builder));

        Ok(endpoint_key)
    }

    fn remove(&mut self, endpoint_key: &str) -> bool {
        if self.has(endpoint_key) {
            self.entry = None;
            return true;
        }

        false
    }

    fn has(&self, endpoint_key: &str) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|(stored, _)| stored == endpoint_key)
    }

    fn get(&self, endpoint_key: &str) -> Option<BuilderRef> {
        self.entry
            .as_ref()
            .filter(|(stored, _)| stored == endpoint_key)
            .map(|(_, builder)| builder.clone())
    }

    fn all(&self) -> Vec<BuilderRef> {
        self.entry
            .as_ref()
            .map(|(_, builder)| vec![builder.clone()])
            .unwrap_or_default()
    }

    fn serialize(&mut self, _ctx: &mut ResolutionContext) -> Result<Option<Value>, Error> {
        match &self.entry {
            Some((_, builder)) => builder.serialize().map(Some),
            None => Ok(None),
        }
    }
}
