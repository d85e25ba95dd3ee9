use std::collections::VecDeque;

use tokio::sync::mpsc;

use crate::core::raw_msg::RawMsg;
use crate::integration::script::ScriptedEvent;

/// Something the runtime should react to next
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    Raw(RawMsg),
    Scripted(ScriptedEvent),
}

/// Where page events come from: a live host channel or a replay script
#[derive(Debug)]
pub enum EventSource {
    Channel(mpsc::UnboundedReceiver<RawMsg>),
    Script(VecDeque<ScriptedEvent>),
}

impl EventSource {
    pub fn channel(rx: mpsc::UnboundedReceiver<RawMsg>) -> Self {
        EventSource::Channel(rx)
    }

    pub fn script(events: impl IntoIterator<Item = ScriptedEvent>) -> Self {
        EventSource::Script(events.into_iter().collect())
    }

    /// `None` once the channel closes or the script runs out
    pub async fn next(&mut self) -> Option<SourceEvent> {
        match self {
            EventSource::Channel(rx) => rx.recv().await.map(SourceEvent::Raw),
            EventSource::Script(queue) => queue.pop_front().map(SourceEvent::Scripted),
        }
    }
}
