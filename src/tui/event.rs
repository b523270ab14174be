use crossterm::event::{self, Event, KeyCode, KeyModifiers};

/// Playground input events.
pub enum DemoEvent {
    Quit,
    /// Push a fresh screen onto the current screen's stack.
    PushScreen,
    /// Present a fresh screen as a modal layer.
    OpenModal,
    /// Place a fresh screen into the next configured tab slot.
    PlaceTab,
    /// Replace the whole hierarchy with a fresh root (close_all).
    RootReplace,
    /// Close the current screen back to its parent.
    CloseTop,
    /// Close the current screen all the way to the root, with a payload.
    CloseToRoot,
    Resize,
}

/// Poll for an event with timeout (blocks up to 250ms).
pub fn poll_event() -> Option<DemoEvent> {
    poll_event_timeout(std::time::Duration::from_millis(250))
}

fn poll_event_timeout(timeout: std::time::Duration) -> Option<DemoEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) => match (key_event.modifiers, key_event.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(DemoEvent::Quit),
            (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(DemoEvent::Quit),
            (_, KeyCode::Char('p')) => Some(DemoEvent::PushScreen),
            (_, KeyCode::Char('m')) => Some(DemoEvent::OpenModal),
            (_, KeyCode::Char('t')) => Some(DemoEvent::PlaceTab),
            (_, KeyCode::Char('r')) => Some(DemoEvent::RootReplace),
            (_, KeyCode::Char('c')) => Some(DemoEvent::CloseTop),
            (_, KeyCode::Char('x')) => Some(DemoEvent::CloseToRoot),
            _ => None,
        },
        Event::Resize(_, _) => Some(DemoEvent::Resize),
        _ => None,
    }
}
