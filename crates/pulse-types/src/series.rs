use serde::{Deserialize, Serialize};
use std::fmt;

/// 序列标识
///
/// name 为主标识；kind 是可选的类型区分符，
/// 用于兼容旧接口中 name + type 的序列寻址方式。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub name: String,
    pub kind: Option<String>,
}

impl SeriesKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Some(kind) => write!(f, "{}/{}", self.name, kind),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(SeriesKey::new("visits").to_string(), "visits");
        assert_eq!(
            SeriesKey::new("visits").with_kind("web").to_string(),
            "visits/web"
        );
    }

    #[test]
    fn test_key_equality() {
        assert_eq!(SeriesKey::new("visits"), SeriesKey::new("visits"));
        assert_ne!(
            SeriesKey::new("visits"),
            SeriesKey::new("visits").with_kind("web")
        );
    }
}
