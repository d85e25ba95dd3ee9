use crate::core::{cmd::Cmd, msg::lightbox::LightboxMsg};
use crate::domain::{cycle::CyclicIndex, media::ImageRef};

/// Lightbox state: a fixed image set and a wrapping cursor into it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightboxState {
    images: Vec<ImageRef>,
    cursor: CyclicIndex,
    is_open: bool,
}

impl LightboxState {
    pub fn new(images: Vec<ImageRef>) -> Self {
        let cursor = CyclicIndex::new(images.len());
        Self {
            images,
            cursor,
            is_open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn current_image(&self) -> Option<&ImageRef> {
        self.images.get(self.cursor.index())
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn update(&mut self, msg: LightboxMsg) -> Vec<Cmd> {
        match msg {
            LightboxMsg::Open(index) => {
                if index >= self.images.len() {
                    return vec![];
                }
                self.cursor.go_to(index as isize);
                self.is_open = true;
                let mut cmds = self.render();
                cmds.push(Cmd::ShowLightbox);
                cmds
            }

            LightboxMsg::Previous => {
                self.cursor.previous();
                self.render()
            }

            LightboxMsg::Next => {
                self.cursor.next();
                self.render()
            }

            LightboxMsg::Close => {
                self.is_open = false;
                vec![Cmd::HideLightbox]
            }
        }
    }

    fn render(&self) -> Vec<Cmd> {
        self.current_image()
            .map(|image| Cmd::RenderLightboxImage(image.clone()))
            .into_iter()
            .collect()
    }
}
