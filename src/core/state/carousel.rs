use crate::core::{cmd::Cmd, msg::carousel::CarouselMsg};
use crate::domain::cycle::CyclicIndex;

/// Testimonial carousel state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselState {
    cursor: CyclicIndex,
    autoplay: bool,
}

impl CarouselState {
    pub fn new(slide_count: usize) -> Self {
        Self {
            cursor: CyclicIndex::new(slide_count),
            autoplay: false,
        }
    }

    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn slide_count(&self) -> usize {
        self.cursor.len()
    }

    /// Whether autoplay should currently be armed
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay
    }

    pub fn update(&mut self, msg: CarouselMsg) -> Vec<Cmd> {
        match msg {
            CarouselMsg::Start => {
                let mut cmds = self.render();
                cmds.extend(self.start_autoplay());
                cmds
            }

            CarouselMsg::Previous => {
                self.cursor.previous();
                self.render()
            }

            CarouselMsg::Next => {
                self.cursor.next();
                self.render()
            }

            // A tick queued before the timer stopped must not advance
            CarouselMsg::AutoplayTick if !self.autoplay => vec![],
            CarouselMsg::AutoplayTick => {
                self.cursor.next();
                self.render()
            }

            CarouselMsg::GoTo(index) => {
                self.cursor.go_to(index as isize);
                self.render()
            }

            CarouselMsg::PointerEntered => {
                self.autoplay = false;
                vec![Cmd::StopAutoplay]
            }

            CarouselMsg::PointerLeft => self.start_autoplay(),
        }
    }

    fn render(&self) -> Vec<Cmd> {
        vec![Cmd::RenderCarousel {
            index: self.cursor.index(),
        }]
    }

    // An empty carousel has nothing to advance to.
    fn start_autoplay(&mut self) -> Vec<Cmd> {
        if self.cursor.is_empty() {
            return vec![];
        }
        self.autoplay = true;
        vec![Cmd::StartAutoplay]
    }
}
