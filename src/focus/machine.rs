use super::{
    Control, Effect, FocusContext, FocusState, Key, PageButton, Step, Zone, CONTROL_ORDER,
};
use crate::domain::MovieId;

const LAST_CONTROL: usize = CONTROL_ORDER.len() - 1;

/// Accumulates the next state and its effects for one step.
struct Transition<'s> {
    prev: &'s FocusState,
    next: FocusState,
    effects: Vec<Effect>,
}

impl<'s> Transition<'s> {
    fn new(prev: &'s FocusState) -> Self {
        Self {
            prev,
            next: prev.clone(),
            effects: Vec::new(),
        }
    }

    fn push(&mut self, effect: Effect) {
        if !self.effects.contains(&effect) {
            self.effects.push(effect);
        }
    }

    fn leave_zone(&mut self, zone: Zone) {
        if self.prev.zone != zone {
            self.push(Effect::CancelActivation);
        }
    }

    fn focus_control(&mut self, index: usize, ctx: &FocusContext<'_>) {
        let index = index.min(LAST_CONTROL);
        let control = Control::at(index);
        let unchanged = self.next.zone.is_control_row() && self.next.control_index == index;

        self.next.zone = control.zone();
        self.next.control_index = index;
        self.push(Effect::FocusControl(control));
        if unchanged {
            return;
        }

        self.push(Effect::CancelActivation);
        if let Some(filter) = control.filter() {
            self.push(Effect::SetFocusedFilter(filter));
            if filter != ctx.active_filter {
                if let Some(category) = filter.category() {
                    self.push(Effect::ScheduleActivation(category));
                }
            }
        }
    }

    fn focus_card(&mut self, index: usize, ids: &[MovieId]) {
        let Some(&movie_id) = ids.get(index) else {
            return;
        };
        self.leave_zone(Zone::Grid);
        self.next.zone = Zone::Grid;
        self.next.card_index = index;
        self.push(Effect::FocusCard { index, movie_id });
        self.push(Effect::ScrollIntoView { index });
    }

    fn focus_pagination(&mut self, button: PageButton) {
        self.leave_zone(Zone::Pagination);
        self.next.zone = Zone::Pagination;
        self.next.page_button = button;
        self.push(Effect::FocusPagination(button));
    }

    fn finish(self) -> Step {
        Step {
            state: self.next,
            effects: self.effects,
        }
    }
}

/// Applies one key press to the focus state.
#[must_use]
pub fn navigate(state: &FocusState, key: Key, ctx: &FocusContext<'_>) -> Step {
    if key == Key::Tab {
        return Step::unchanged(state);
    }
    let mut t = Transition::new(state);

    match key {
        Key::Tab => {}
        Key::Escape => {
            if ctx.query_non_empty {
                t.push(Effect::ClearSearchQuery);
            }
            // Dropped even when control 0 already holds focus.
            t.push(Effect::CancelActivation);
            t.focus_control(0, ctx);
        }
        _ if state.zone.is_control_row() => control_row(&mut t, key, ctx),
        _ if state.zone == Zone::Grid && ctx.visible_ids.is_empty() => t.focus_control(0, ctx),
        _ if state.zone == Zone::Grid => grid(&mut t, key, ctx),
        _ => pagination(&mut t, key, ctx),
    }

    t.finish()
}

fn control_row(t: &mut Transition<'_>, key: Key, ctx: &FocusContext<'_>) {
    let index = t.prev.control_index.min(LAST_CONTROL);

    match key {
        Key::Left if index > 0 => t.focus_control(index - 1, ctx),
        Key::Right if index < LAST_CONTROL => t.focus_control(index + 1, ctx),
        Key::Down => {
            if ctx.visible_ids.is_empty() {
                if ctx.pagination.is_some() {
                    t.focus_pagination(PageButton::Previous);
                }
            } else {
                t.focus_card(0, ctx.visible_ids);
            }
        }
        Key::Enter => {
            if let Some(filter) = Control::at(index).filter() {
                t.push(Effect::CancelActivation);
                t.push(Effect::SetFocusedFilter(filter));
                t.push(Effect::ActivateFilter(filter));
            }
        }
        _ => {}
    }
}

fn grid(t: &mut Transition<'_>, key: Key, ctx: &FocusContext<'_>) {
    let ids = ctx.visible_ids;
    let len = ids.len();
    let index = t.prev.card_index.min(len - 1);
    let columns = ctx.columns.max(1);

    match key {
        Key::Left if index > 0 => t.focus_card(index - 1, ids),
        Key::Right if index + 1 < len => t.focus_card(index + 1, ids),
        Key::Down => {
            if index + columns < len {
                t.focus_card(index + columns, ids);
            } else if ctx.pagination.is_some() {
                t.focus_pagination(PageButton::Previous);
            }
        }
        Key::Up => {
            if index >= columns {
                t.focus_card(index - columns, ids);
            } else {
                t.focus_control(t.prev.control_index, ctx);
            }
        }
        Key::Enter => {
            let movie_id = ids[index];
            t.next.last_focused_movie_id = Some(movie_id);
            t.push(Effect::OpenDetails(movie_id));
        }
        _ => {}
    }
}

fn pagination(t: &mut Transition<'_>, key: Key, ctx: &FocusContext<'_>) {
    let ids = ctx.visible_ids;

    match key {
        Key::Left if t.prev.page_button != PageButton::Previous => {
            t.focus_pagination(PageButton::Previous);
        }
        Key::Right if t.prev.page_button != PageButton::Next => {
            t.focus_pagination(PageButton::Next);
        }
        Key::Up => {
            if ids.is_empty() {
                t.focus_control(0, ctx);
            } else {
                t.focus_card(t.prev.card_index.min(ids.len() - 1), ids);
            }
        }
        Key::Enter => {
            let Some(info) = ctx.pagination else {
                return;
            };
            let last = i64::from(info.total_pages.max(1));
            let target = (i64::from(info.page) + t.prev.page_button.delta()).clamp(1, last);
            let target = u32::try_from(target).unwrap_or(info.page);
            if target != info.page {
                t.next.card_index = 0;
                t.push(Effect::ChangePage {
                    category: info.category,
                    page: target,
                });
            }
        }
        _ => {}
    }
}

/// Re-validates the focus state against freshly painted content.
///
/// Clamps the card index into the visible range and moves focus out of a
/// pagination bar that is no longer shown.
#[must_use]
pub fn reconcile(state: &FocusState, ctx: &FocusContext<'_>) -> Step {
    let mut t = Transition::new(state);
    let ids = ctx.visible_ids;
    let len = ids.len();

    match state.zone {
        Zone::Grid if len > 0 && state.card_index >= len => t.focus_card(len - 1, ids),
        Zone::Pagination if ctx.pagination.is_none() => {
            if len == 0 {
                t.focus_control(0, ctx);
            } else {
                t.focus_card(0, ids);
            }
        }
        _ if state.card_index >= len.max(1) => t.next.card_index = len.saturating_sub(1),
        _ => {}
    }

    t.finish()
}

/// Restores focus to the last opened card once the browse view has content.
///
/// Returns `None` while there is nothing to do yet: restoration already ran,
/// or a card is remembered but no cards are painted so far.
#[must_use]
pub fn restore_on_first_paint(
    state: &FocusState,
    ctx: &FocusContext<'_>,
    last_focused: Option<MovieId>,
) -> Option<Step> {
    if state.restored || (last_focused.is_some() && ctx.visible_ids.is_empty()) {
        return None;
    }

    let mut t = Transition::new(state);
    t.next.restored = true;
    let position =
        last_focused.and_then(|id| ctx.visible_ids.iter().position(|&visible| visible == id));

    match position {
        Some(index) => {
            t.next.last_focused_movie_id = last_focused;
            t.focus_card(index, ctx.visible_ids);
        }
        None => t.focus_control(0, ctx),
    }

    Some(t.finish())
}
