use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::tui::DemoApp;

const KEY_HELP: &str =
    "p push · m modal · t tab · r root-replace · c close · x close-to-root · q quit";

pub fn draw_ui(frame: &mut Frame, app: &DemoApp) {
    use Constraint::{Length, Min, Percentage};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    // Title bar
    let title = format!(
        "Tiller Playground ({} screens) | {}",
        app.nav.screen_count(),
        app.status
    );
    frame.render_widget(Span::raw(title), title_area);

    // Main area: topology on the left, return/journal panes on the right
    let columns = Layout::horizontal([Percentage(60), Percentage(40)]);
    let [topology_area, side_area] = columns.areas(main_area);
    draw_topology(frame, topology_area, app);

    let side = Layout::vertical([Percentage(50), Percentage(50)]);
    let [returns_area, journal_area] = side.areas(side_area);
    draw_returns(frame, returns_area, app);
    draw_journal(frame, journal_area, app);

    // Footer
    frame.render_widget(
        Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

/// One bordered column per navigation stack, bottom of the stack first,
/// with modal layers and tab slots listed beneath.
fn draw_topology(frame: &mut Frame, area: Rect, app: &DemoApp) {
    let topo = app.topology.borrow();
    let stack_count = topo.stacks.len().max(1) as u16;

    let rows = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(3),
    ]);
    let [stacks_area, modal_area, tabs_area] = rows.areas(area);

    let widths: Vec<Constraint> =
        (0..stack_count).map(|_| Constraint::Ratio(1, stack_count as u32)).collect();
    let stack_areas = Layout::horizontal(widths).split(stacks_area);

    if topo.stacks.is_empty() {
        let empty = Paragraph::new("no stacks").block(Block::bordered().title("stacks"));
        frame.render_widget(empty, stacks_area);
    }

    for (index, (container, stack)) in topo.stacks.iter().enumerate() {
        let items: Vec<ListItem> = stack
            .iter()
            .map(|&screen| {
                let name = app.nav.title(screen).unwrap_or_default().to_string();
                let mut line = format!("{screen} {name}");
                if screen == app.cursor {
                    line.push_str("  ◀");
                }
                let mut style = Style::default();
                if app.nav.is_modal(screen) {
                    style = style.fg(Color::Magenta);
                }
                if screen == app.cursor {
                    style = style.add_modifier(Modifier::BOLD);
                }
                ListItem::new(Line::styled(line, style))
            })
            .collect();
        let is_root_stack =
            topo.root.is_some_and(|root| stack.first().copied() == Some(root));
        let marker = if is_root_stack { " (root)" } else { "" };
        let list =
            List::new(items).block(Block::bordered().title(format!("{container}{marker}")));
        frame.render_widget(list, stack_areas[index]);
    }

    let modal_text = if topo.modals.is_empty() {
        String::from("none")
    } else {
        topo.modals
            .iter()
            .map(|layer| format!("over {}", layer.host))
            .collect::<Vec<_>>()
            .join(", ")
    };
    frame.render_widget(
        Paragraph::new(modal_text).block(Block::bordered().title("modal layers")),
        modal_area,
    );

    // Closed tab screens linger in the toolkit slot (there is no
    // remove-from-tab primitive); show only the live ones.
    let live_tabs: Vec<String> = topo
        .tabs
        .iter()
        .filter(|(_, screen)| app.nav.contains(*screen))
        .map(|(name, screen)| format!("{name}: {screen}"))
        .collect();
    let tab_text = if live_tabs.is_empty() { String::from("none") } else { live_tabs.join(", ") };
    frame.render_widget(
        Paragraph::new(tab_text).block(Block::bordered().title("tabs")),
        tabs_area,
    );
}

fn draw_returns(frame: &mut Frame, area: Rect, app: &DemoApp) {
    let returns = app.returns.borrow();
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = returns
        .iter()
        .rev()
        .take(visible.max(1))
        .map(|entry| ListItem::new(entry.clone()))
        .collect();
    let list = List::new(items).block(Block::bordered().title("on_return"));
    frame.render_widget(list, area);
}

fn draw_journal(frame: &mut Frame, area: Rect, app: &DemoApp) {
    let topo = app.topology.borrow();
    let items: Vec<ListItem> = topo
        .journal
        .iter()
        .rev()
        .map(|entry| ListItem::new(entry.clone()))
        .collect();
    let list = List::new(items).block(Block::bordered().title("toolkit journal"));
    frame.render_widget(list, area);
}
