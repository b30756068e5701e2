use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::task::TaskStatus;
use crate::ops::sort::{SortChoice, menu_choices};
use crate::rpc::Command;
use crate::tui::app::App;
use crate::tui::dialog::{Dialog, LimitKind, Menu, NumberInput, YesNo};
use crate::util::unicode;

/// Room the remove prompt keeps around the task name
const REMOVE_PROMPT_MARGIN: usize = 15;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) -> Option<Command> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            app.should_quit = true;
        }
        // reset + redraw
        (KeyModifiers::CONTROL, KeyCode::Char('l')) | (_, KeyCode::Esc) => app.viewport.reset(),

        (_, KeyCode::Up) => app.viewport.move_up(),
        (_, KeyCode::Down) => app.viewport.move_down(),
        (_, KeyCode::Home) => app.viewport.home(),
        (_, KeyCode::End) => app.viewport.end(),

        (_, KeyCode::Char('s')) => open_sort_menu(app),
        (_, KeyCode::Char('u')) => open_limit(app, LimitKind::Upload),
        (_, KeyCode::Char('d')) => open_limit(app, LimitKind::Download),

        (_, KeyCode::Char('p')) => {
            let task = app.focused_task()?;
            return Some(if task.status == TaskStatus::Stopped {
                Command::Start(task.id)
            } else {
                Command::Stop(task.id)
            });
        }
        (_, KeyCode::Char('v')) => {
            let task = app.focused_task()?;
            if task.status != TaskStatus::Checking {
                return Some(Command::Verify(task.id));
            }
        }
        (_, KeyCode::Char('r')) => confirm_remove(app),
        _ => {}
    }
    None
}

fn open_sort_menu(app: &mut App) {
    let options: Vec<(SortChoice, String)> = menu_choices()
        .into_iter()
        .map(|choice| (choice, choice.label().to_string()))
        .collect();
    let current = options
        .iter()
        .position(|(choice, _)| *choice == SortChoice::Key(app.sort.key))
        .unwrap_or(0);
    app.dialog = Some(Dialog::Sort(Menu::new("Sort order", options, current)));
}

fn open_limit(app: &mut App, kind: LimitKind) {
    let stats = app.registry.stats();
    let current = match kind {
        LimitKind::Upload => stats.speed_limit_up(),
        LimitKind::Download => stats.speed_limit_down(),
    };
    app.dialog = Some(Dialog::Limit {
        kind,
        input: NumberInput::new(kind.prompt(), current / 1024),
    });
}

fn confirm_remove(app: &mut App) {
    let room = (app.width as usize).saturating_sub(REMOVE_PROMPT_MARGIN);
    let Some(task) = app.focused_task() else {
        return;
    };
    let name = unicode::truncate_to_width(&task.name, room);
    let id = task.id;
    app.dialog = Some(Dialog::Remove {
        id,
        prompt: YesNo::new(format!("Remove {}?", name)),
    });
}
