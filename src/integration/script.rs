//! Scripted page interactions
//!
//! A script is a JSON5 list of events addressed by simple selectors
//! (`#id`, `.class`, `tag` or `[attr=value]`, plus an optional `index` among
//! the matches):
//!
//! ```json5
//! [
//!   { event: "load" },
//!   { event: "click", target: ".gallery-item", index: 1 },
//!   { event: "key", key: "ArrowRight" },
//!   { event: "wait", ms: 5000 },
//! ]
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::raw_msg::RawMsg;
use crate::infrastructure::dom::{Dom, NodeId};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid script: {0}")]
    Parse(#[from] json5::Error),

    #[error("no element matches {selector} at index {index}")]
    NoMatch { selector: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptedEvent {
    Load,
    Click {
        target: String,
        #[serde(default)]
        index: usize,
    },
    Key {
        key: String,
    },
    /// Scroll the page to an absolute offset
    Scroll {
        y: f64,
    },
    PointerEnter {
        target: String,
        #[serde(default)]
        index: usize,
    },
    PointerLeave {
        target: String,
        #[serde(default)]
        index: usize,
    },
    Input {
        target: String,
        #[serde(default)]
        index: usize,
        value: String,
    },
    Submit {
        target: String,
        #[serde(default)]
        index: usize,
    },
    /// Let timers and pending submissions run
    Wait {
        ms: u64,
    },
}

impl ScriptedEvent {
    pub fn wait_duration(&self) -> Option<Duration> {
        match self {
            ScriptedEvent::Wait { ms } => Some(Duration::from_millis(*ms)),
            _ => None,
        }
    }

    /// Raw event for this step; `None` for waits
    pub fn resolve<D: Dom>(&self, dom: &D) -> Result<Option<RawMsg>, ScriptError> {
        let raw = match self {
            ScriptedEvent::Load => RawMsg::Load,
            ScriptedEvent::Click { target, index } => RawMsg::Click(select(dom, target, *index)?),
            ScriptedEvent::Key { key } => RawMsg::KeyDown(key.clone()),
            ScriptedEvent::Scroll { y } => RawMsg::Scroll(*y),
            ScriptedEvent::PointerEnter { target, index } => {
                RawMsg::PointerEnter(select(dom, target, *index)?)
            }
            ScriptedEvent::PointerLeave { target, index } => {
                RawMsg::PointerLeave(select(dom, target, *index)?)
            }
            ScriptedEvent::Input {
                target,
                index,
                value,
            } => RawMsg::Input {
                node: select(dom, target, *index)?,
                value: value.clone(),
            },
            ScriptedEvent::Submit { target, index } => RawMsg::Submit(select(dom, target, *index)?),
            ScriptedEvent::Wait { .. } => return Ok(None),
        };
        Ok(Some(raw))
    }
}

pub fn parse_script(raw: &str) -> Result<Vec<ScriptedEvent>, ScriptError> {
    Ok(json5::from_str(raw)?)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptedEvent>, ScriptError> {
    parse_script(&std::fs::read_to_string(path)?)
}

/// All elements matching a simple selector, in document order
pub fn select_all<D: Dom>(dom: &D, selector: &str) -> Vec<NodeId> {
    let root = dom.root();
    if let Some(id) = selector.strip_prefix('#') {
        return dom.element_by_id(id).into_iter().collect();
    }
    if let Some(class) = selector.strip_prefix('.') {
        return dom.descendants_with_class(root, class);
    }
    if let Some((name, value)) = selector
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .and_then(|pair| pair.split_once('='))
    {
        let value = value.trim_matches('"');
        return dom
            .descendants(root)
            .into_iter()
            .filter(|node| dom.attribute(*node, name).as_deref() == Some(value))
            .collect();
    }
    dom.descendants_with_tag(root, selector)
}

fn select<D: Dom>(dom: &D, selector: &str, index: usize) -> Result<NodeId, ScriptError> {
    select_all(dom, selector)
        .get(index)
        .copied()
        .ok_or_else(|| ScriptError::NoMatch {
            selector: selector.to_string(),
            index,
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::infrastructure::{
        dom::MemoryDom,
        markup::{build_document, PageMarkup},
    };

    fn sample() -> MemoryDom {
        build_document(&PageMarkup::sample()).expect("sample markup builds")
    }

    #[test]
    fn test_parse_script() -> Result<(), ScriptError> {
        let script = parse_script(
            r#"[
                { event: "load" },
                { event: "click", target: ".gallery-item", index: 1 },
                { event: "key", key: "Escape" },
                { event: "input", target: "[name=email]", value: "ada@example.com" },
                { event: "wait", ms: 250 },
            ]"#,
        )?;
        assert_eq!(script.len(), 5);
        assert_eq!(
            script[1],
            ScriptedEvent::Click {
                target: ".gallery-item".to_string(),
                index: 1
            }
        );
        assert_eq!(script[4].wait_duration(), Some(Duration::from_millis(250)));
        assert_eq!(script[0].wait_duration(), None);
        Ok(())
    }

    #[rstest]
    #[case("#gallery", 1)]
    #[case(".gallery-item", 3)]
    #[case("[name=email]", 1)]
    #[case("[name=\"message\"]", 1)]
    #[case("section", 5)]
    #[case("#missing", 0)]
    fn test_select_all(#[case] selector: &str, #[case] expected: usize) {
        assert_eq!(select_all(&sample(), selector).len(), expected);
    }

    #[test]
    fn test_resolve_click_by_index() -> Result<(), ScriptError> {
        let dom = sample();
        let items = dom.descendants_with_class(dom.root(), "gallery-item");
        let event = ScriptedEvent::Click {
            target: ".gallery-item".to_string(),
            index: 2,
        };
        assert_eq!(event.resolve(&dom)?, Some(RawMsg::Click(items[2])));
        Ok(())
    }

    #[test]
    fn test_resolve_missing_target() {
        let event = ScriptedEvent::Submit {
            target: "#newsletter".to_string(),
            index: 0,
        };
        assert!(matches!(
            event.resolve(&sample()),
            Err(ScriptError::NoMatch { index: 0, .. })
        ));
    }

    #[test]
    fn test_wait_resolves_to_nothing() -> Result<(), ScriptError> {
        assert_eq!(ScriptedEvent::Wait { ms: 10 }.resolve(&sample())?, None);
        Ok(())
    }
}
