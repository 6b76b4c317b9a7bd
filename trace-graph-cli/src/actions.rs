//! Scripted interactions for `trace-graph render --action ...`.

use std::fmt;
use std::str::FromStr;

use trace_graph::{InteractionEvent, Point};

/// One scripted step. Parsed from `toggle:ID`, `select:ID`, `expand-all`,
/// `collapse-all`, `zoom-in`, `zoom-out`, `reset-view`, `pan:DX,DY`,
/// `click:X,Y`, `fullscreen`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Toggle(String),
    Select(String),
    ExpandAll,
    CollapseAll,
    ZoomIn,
    ZoomOut,
    ResetView,
    Pan(f32, f32),
    /// Press and release at a screen point
    Click(f32, f32),
    Fullscreen,
}

impl Action {
    /// Events this step feeds into the controller, in order.
    pub fn events(&self) -> Vec<InteractionEvent> {
        match self {
            Action::Toggle(id) => vec![InteractionEvent::Toggle(id.clone())],
            Action::Select(id) => vec![InteractionEvent::Select(Some(id.clone()))],
            Action::ExpandAll => vec![InteractionEvent::ExpandAll],
            Action::CollapseAll => vec![InteractionEvent::CollapseAll],
            Action::ZoomIn => vec![InteractionEvent::ZoomIn],
            Action::ZoomOut => vec![InteractionEvent::ZoomOut],
            Action::ResetView => vec![InteractionEvent::ResetView],
            Action::Pan(dx, dy) => vec![InteractionEvent::Pan { dx: *dx, dy: *dy }],
            Action::Click(x, y) => {
                let point = Point::new(*x, *y);
                vec![
                    InteractionEvent::PointerDown(point),
                    InteractionEvent::PointerUp(point),
                ]
            }
            Action::Fullscreen => vec![InteractionEvent::SetFullscreen(true)],
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let (name, arg) = match raw.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (raw, None),
        };
        match (name, arg) {
            ("toggle", Some(id)) if !id.is_empty() => Ok(Action::Toggle(id.to_string())),
            ("select", Some(id)) if !id.is_empty() => Ok(Action::Select(id.to_string())),
            ("expand-all", None) => Ok(Action::ExpandAll),
            ("collapse-all", None) => Ok(Action::CollapseAll),
            ("zoom-in", None) => Ok(Action::ZoomIn),
            ("zoom-out", None) => Ok(Action::ZoomOut),
            ("reset-view", None) => Ok(Action::ResetView),
            ("fullscreen", None) => Ok(Action::Fullscreen),
            ("pan", Some(pair)) => {
                let (dx, dy) = parse_pair(pair)?;
                Ok(Action::Pan(dx, dy))
            }
            ("click", Some(pair)) => {
                let (x, y) = parse_pair(pair)?;
                Ok(Action::Click(x, y))
            }
            _ => Err(format!("unrecognised action '{raw}'")),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Toggle(id) => write!(f, "toggle:{id}"),
            Action::Select(id) => write!(f, "select:{id}"),
            Action::ExpandAll => f.write_str("expand-all"),
            Action::CollapseAll => f.write_str("collapse-all"),
            Action::ZoomIn => f.write_str("zoom-in"),
            Action::ZoomOut => f.write_str("zoom-out"),
            Action::ResetView => f.write_str("reset-view"),
            Action::Pan(dx, dy) => write!(f, "pan:{dx},{dy}"),
            Action::Click(x, y) => write!(f, "click:{x},{y}"),
            Action::Fullscreen => f.write_str("fullscreen"),
        }
    }
}

fn parse_pair(raw: &str) -> Result<(f32, f32), String> {
    let (a, b) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated numbers, got '{raw}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid number '{part}': {e}"))
    };
    Ok((parse(a)?, parse(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            "toggle:root-tool-0".parse::<Action>(),
            Ok(Action::Toggle("root-tool-0".to_string()))
        );
        assert_eq!("zoom-in".parse::<Action>(), Ok(Action::ZoomIn));
        assert_eq!(" collapse-all ".parse::<Action>(), Ok(Action::CollapseAll));
        assert_eq!("pan:10,-2.5".parse::<Action>(), Ok(Action::Pan(10.0, -2.5)));
        assert_eq!("click:5, 6".parse::<Action>(), Ok(Action::Click(5.0, 6.0)));
    }

    #[test]
    fn test_ids_may_contain_colons() {
        assert_eq!(
            "select:root-a:b".parse::<Action>(),
            Ok(Action::Select("root-a:b".to_string()))
        );
    }

    #[test]
    fn test_rejects_malformed_actions() {
        assert!("toggle".parse::<Action>().is_err());
        assert!("toggle:".parse::<Action>().is_err());
        assert!("zoom-in:2".parse::<Action>().is_err());
        assert!("pan:1".parse::<Action>().is_err());
        assert!("pan:a,b".parse::<Action>().is_err());
        assert!("spin".parse::<Action>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for action in [
            Action::Toggle("root-args".to_string()),
            Action::Pan(3.0, -4.0),
            Action::ResetView,
        ] {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action.clone()));
        }
    }

    #[test]
    fn test_click_expands_to_press_and_release() {
        let events = Action::Click(1.0, 2.0).events();
        assert_eq!(
            events,
            vec![
                InteractionEvent::PointerDown(Point::new(1.0, 2.0)),
                InteractionEvent::PointerUp(Point::new(1.0, 2.0)),
            ]
        );
    }
}
