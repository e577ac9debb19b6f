use std::fmt;

/// One component of an outbound message chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Mention { user_id: u64 },
    Text(String),
}

/// Outbound message addressed to a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub chat_id: String,
    pub segments: Vec<Segment>,
}

impl Reply {
    pub fn chain(chat_id: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            chat_id: chat_id.into(),
            segments,
        }
    }

    pub fn plain(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::chain(chat_id, vec![Segment::Text(text.into())])
    }

    /// Concatenated text segments, mentions skipped
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Text(t) => Some(t.as_str()),
                Segment::Mention { .. } => None,
            })
            .collect()
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Mention { user_id } => write!(f, "@{}", user_id)?,
                Segment::Text(text) => write!(f, "{}", text)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_chain() {
        let reply = Reply::chain("100", vec![
            Segment::Mention { user_id: 12345 },
            Segment::Text(" Welcome!".to_string()),
        ]);
        assert_eq!(reply.to_string(), "@12345 Welcome!");
        assert_eq!(reply.text(), " Welcome!");
    }
}
