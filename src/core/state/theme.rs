use crate::core::{cmd::Cmd, msg::theme::ThemeMsg};
use crate::domain::theme::Theme;

/// Theme controller state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub current: Theme,
}

impl ThemeState {
    /// Theme-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: ThemeMsg) -> Vec<Cmd> {
        match msg {
            ThemeMsg::Restore(stored) => self.apply(Theme::from_stored(stored.as_deref())),
            ThemeMsg::Toggle => self.apply(self.current.opposite()),
        }
    }

    fn apply(&mut self, theme: Theme) -> Vec<Cmd> {
        self.current = theme;
        vec![Cmd::ApplyTheme(theme), Cmd::PersistTheme(theme)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_restore_defaults_to_light() {
        let mut state = ThemeState::default();
        let cmds = state.update(ThemeMsg::Restore(None));
        assert_eq!(state.current, Theme::Light);
        assert_eq!(
            cmds,
            vec![Cmd::ApplyTheme(Theme::Light), Cmd::PersistTheme(Theme::Light)]
        );
    }

    #[test]
    fn test_restore_dark() {
        let mut state = ThemeState::default();
        state.update(ThemeMsg::Restore(Some("dark".into())));
        assert_eq!(state.current, Theme::Dark);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("light"))]
    #[case(Some("dark"))]
    #[case(Some("garbage"))]
    fn test_toggle_twice_returns_to_start(#[case] stored: Option<&str>) {
        let mut state = ThemeState::default();
        state.update(ThemeMsg::Restore(stored.map(String::from)));
        let start = state.current;

        let cmds = state.update(ThemeMsg::Toggle);
        assert_eq!(state.current, start.opposite());
        assert_eq!(cmds[1], Cmd::PersistTheme(start.opposite()));

        state.update(ThemeMsg::Toggle);
        assert_eq!(state.current, start);
    }
}
