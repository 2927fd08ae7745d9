use indexmap::IndexSet;
use std::fmt;

use crate::deferred::DeferredTransform;

/// Ordered, deduplicated utility classes backing one `class` attribute.
///
/// Tokens keep the position of their first occurrence; later duplicates and
/// empty tokens never make it into the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: IndexSet<String>,
}

impl ClassList {
    /// Normalize a raw attribute value.
    ///
    /// Any whitespace separates tokens, so values spread over several lines in
    /// the template never produce tokens with embedded newlines.
    pub fn parse(value: &str) -> Self {
        let mut list = Self::default();
        list.extend(value.split_whitespace());
        list
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Replace `from` with `to` in place. If `to` is already present earlier
    /// in the list the replaced token collapses into it.
    pub fn replace(&mut self, from: &str, to: &str) {
        if !self.tokens.contains(from) {
            return;
        }
        self.tokens = std::mem::take(&mut self.tokens)
            .into_iter()
            .map(|token| if token == from { to.to_string() } else { token })
            .collect();
    }

    /// Run one deferred transform against the current tokens
    pub fn apply(&mut self, transform: &DeferredTransform) {
        transform.apply(self);
    }
}

impl<'a> Extend<&'a str> for ClassList {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for token in iter {
            let token = token.trim();
            if !token.is_empty() && !self.tokens.contains(token) {
                self.tokens.insert(token.to_string());
            }
        }
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}
