use std::time::Duration;

use color_eyre::eyre::Result;
use pretty_assertions::assert_eq;
use rstest::rstest;

use pagewire::{
    core::{
        cmd::Cmd,
        msg::{carousel::CarouselMsg, Msg},
        raw_msg::RawMsg,
        state::AppState,
        update::update,
    },
    infrastructure::{
        dom::{Dom, MemoryDom},
        markup::{PageMarkup, SectionContent, SectionMarkup},
        storage::MemoryStore,
    },
    test_helpers::{node, runtime_for, started_sample_runtime, MockTransport},
    PageRuntime,
};

const PERIOD: Duration = Duration::from_millis(5_000);
// Lands just past a tick so the deadline never races it
const SLACK: Duration = Duration::from_millis(100);

fn active_dots(runtime: &PageRuntime<MemoryDom>) -> Vec<usize> {
    let carousel = runtime.bindings().carousel.as_ref().expect("carousel bound");
    carousel
        .dots
        .iter()
        .enumerate()
        .filter(|(_, dot)| runtime.dom().has_class(**dot, "active"))
        .map(|(i, _)| i)
        .collect()
}

fn stage_transform(runtime: &PageRuntime<MemoryDom>) -> Option<String> {
    let stage = runtime.bindings().carousel.as_ref().map(|c| c.stage)?;
    runtime.dom().style(stage, "transform")
}

#[rstest]
fn test_next_then_previous_returns_to_start(#[values(1, 2, 3, 5)] n: usize) {
    for i in 0..n {
        let state = AppState::default().with_slide_count(n);
        let (state, _) = update(Msg::Carousel(CarouselMsg::GoTo(i)), state);

        let (state, _) = update(Msg::Carousel(CarouselMsg::Next), state);
        let (state, _) = update(Msg::Carousel(CarouselMsg::Previous), state);
        assert_eq!(state.carousel.index(), i);

        let (state, _) = update(Msg::Carousel(CarouselMsg::Previous), state);
        let (state, _) = update(Msg::Carousel(CarouselMsg::Next), state);
        assert_eq!(state.carousel.index(), i);
    }
}

#[tokio::test(start_paused = true)]
async fn test_initial_render_and_manual_navigation() -> Result<()> {
    let mut runtime = started_sample_runtime(MockTransport::responding(200))?;
    assert_eq!(stage_transform(&runtime).as_deref(), Some("translateX(-0%)"));
    assert_eq!(active_dots(&runtime), vec![0]);

    let root = runtime.dom().root();
    let prev = runtime.dom().first_with_class(root, "test-prev").expect("prev");
    runtime.dispatch_raw(RawMsg::Click(prev))?;
    assert_eq!(stage_transform(&runtime).as_deref(), Some("translateX(-200%)"));
    assert_eq!(active_dots(&runtime), vec![2]);

    let dot = runtime.bindings().carousel.as_ref().map(|c| c.dots[1]).expect("dot");
    runtime.dispatch_raw(RawMsg::Click(dot))?;
    assert_eq!(stage_transform(&runtime).as_deref(), Some("translateX(-100%)"));
    assert_eq!(active_dots(&runtime), vec![1]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_advances_once_per_period() -> Result<()> {
    let mut runtime = started_sample_runtime(MockTransport::responding(200))?;

    runtime.run_for(PERIOD - SLACK).await?;
    assert_eq!(runtime.state().carousel.index(), 0);

    runtime.run_for(SLACK * 2).await?;
    assert_eq!(runtime.state().carousel.index(), 1);

    runtime.run_for(PERIOD).await?;
    assert_eq!(runtime.state().carousel.index(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_restarting_autoplay_keeps_a_single_timer() -> Result<()> {
    let mut runtime = started_sample_runtime(MockTransport::responding(200))?;
    let viewport = node(runtime.dom(), "testimonial-viewport");

    // Every leave re-arms; none may leave a second timer behind
    runtime.dispatch_raw(RawMsg::PointerLeave(viewport))?;
    runtime.dispatch_raw(RawMsg::PointerLeave(viewport))?;
    runtime.dispatch_raw(RawMsg::PointerLeave(viewport))?;

    runtime.run_for(PERIOD + SLACK).await?;
    assert_eq!(runtime.state().carousel.index(), 1);
    runtime.run_for(PERIOD).await?;
    assert_eq!(runtime.state().carousel.index(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_hover_pauses_autoplay() -> Result<()> {
    let mut runtime = started_sample_runtime(MockTransport::responding(200))?;
    let viewport = node(runtime.dom(), "testimonial-viewport");

    runtime.dispatch_raw(RawMsg::PointerEnter(viewport))?;
    assert!(!runtime.is_autoplaying());
    runtime.run_for(PERIOD * 3).await?;
    assert_eq!(runtime.state().carousel.index(), 0);

    runtime.dispatch_raw(RawMsg::PointerLeave(viewport))?;
    assert!(runtime.is_autoplaying());
    runtime.run_for(PERIOD + SLACK).await?;
    assert_eq!(runtime.state().carousel.index(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_hover_drops_tick_already_queued() -> Result<()> {
    let mut runtime = started_sample_runtime(MockTransport::responding(200))?;
    let viewport = node(runtime.dom(), "testimonial-viewport");

    // The timer fires while nothing drains the queue
    tokio::time::sleep(PERIOD + SLACK).await;
    runtime.dispatch_raw(RawMsg::PointerEnter(viewport))?;
    assert_eq!(runtime.process_pending()?, 1);

    assert_eq!(runtime.state().carousel.index(), 0);
    assert_eq!(stage_transform(&runtime).as_deref(), Some("translateX(-0%)"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_empty_carousel_is_inert() -> Result<()> {
    let markup = PageMarkup {
        sections: vec![SectionMarkup::new("testimonials")
            .with_content(SectionContent::Testimonials { quotes: vec![] })],
        ..PageMarkup::sample()
    };
    let mut runtime = runtime_for(&markup, MemoryStore::new(), MockTransport::responding(200))?;
    runtime.start()?;

    let carousel = runtime.bindings().carousel.clone().expect("carousel bound");
    assert_eq!(carousel.slide_count, 0);
    assert!(carousel.dots.is_empty());
    assert!(!runtime.is_autoplaying());

    let root = runtime.dom().root();
    let next = runtime.dom().first_with_class(root, "test-next").expect("next");
    runtime.dispatch_raw(RawMsg::Click(next))?;
    assert_eq!(runtime.state().carousel.index(), 0);
    assert_eq!(stage_transform(&runtime).as_deref(), Some("translateX(-0%)"));

    let (_, cmds) = update(Msg::Carousel(CarouselMsg::Start), AppState::default());
    assert_eq!(cmds, vec![Cmd::RenderCarousel { index: 0 }]);
    Ok(())
}
