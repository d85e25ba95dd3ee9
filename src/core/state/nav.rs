use crate::core::{cmd::Cmd, msg::nav::NavMsg};

/// Navigation controller state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub menu_open: bool,
}

impl NavState {
    pub fn update(&mut self, msg: NavMsg) -> Vec<Cmd> {
        match msg {
            NavMsg::ToggleMenu => {
                self.menu_open = !self.menu_open;
                vec![Cmd::SetMenuOpen(self.menu_open)]
            }

            NavMsg::LinkActivated => {
                if self.menu_open {
                    self.menu_open = false;
                    vec![Cmd::SetMenuOpen(false)]
                } else {
                    vec![]
                }
            }

            NavMsg::AnchorActivated(target) => vec![Cmd::ScrollToSection(target)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_menu() {
        let mut nav = NavState::default();
        assert_eq!(nav.update(NavMsg::ToggleMenu), vec![Cmd::SetMenuOpen(true)]);
        assert!(nav.menu_open);
        assert_eq!(nav.update(NavMsg::ToggleMenu), vec![Cmd::SetMenuOpen(false)]);
        assert!(!nav.menu_open);
    }

    #[test]
    fn test_link_closes_open_menu_only() {
        let mut nav = NavState::default();
        assert!(nav.update(NavMsg::LinkActivated).is_empty());

        nav.update(NavMsg::ToggleMenu);
        assert_eq!(
            nav.update(NavMsg::LinkActivated),
            vec![Cmd::SetMenuOpen(false)]
        );
        assert!(!nav.menu_open);
    }

    #[test]
    fn test_anchor_scrolls() {
        let mut nav = NavState::default();
        assert_eq!(
            nav.update(NavMsg::AnchorActivated("contact".into())),
            vec![Cmd::ScrollToSection("contact".into())]
        );
    }
}
