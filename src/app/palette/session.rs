use super::debounce::{DebounceTicket, DebouncedInput, DEFAULT_QUIET_WINDOW};
use super::fanout::{CycleId, FanoutRequest, RemoteResults, DEFAULT_PAGE_SIZE};
use super::index::StaticIndexBuilder;
use super::item::{PaletteItem, PaletteTarget};
use super::merge::{group_items, regroup, EntityVisibility, GroupBucket, ResultMerger};
use super::selection::SelectionState;
use crate::domain::role::RoleContext;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PalettePhase {
    Closed,
    /// Open with no query; static items only.
    Idle,
    /// Input is settling or the remote half of a cycle is in flight.
    Searching,
    /// The merged list for the current query is committed.
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaletteEvent {
    Open,
    Close,
    /// The host navigated somewhere; closes like `Close`.
    ExternalNavigation,
    InsertChar(char),
    Backspace,
    ClearQuery,
    QuerySettled(u64),
    RemoteLoaded(CycleId, RemoteResults),
    MoveDown,
    MoveUp,
    Hover(usize),
    Confirm,
}

/// Work the runtime must carry out on behalf of the palette.
#[derive(Debug, Clone)]
pub enum PaletteEffect {
    Debounce(DebounceTicket),
    Search(FanoutRequest),
    Run(PaletteTarget),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSettings {
    pub quiet_window: Duration,
    pub page_size: u32,
    pub entity_visibility: EntityVisibility,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            quiet_window: DEFAULT_QUIET_WINDOW,
            page_size: DEFAULT_PAGE_SIZE,
            entity_visibility: EntityVisibility::default(),
        }
    }
}

#[derive(Debug)]
struct ActiveCycle {
    id: CycleId,
    query: String,
    token: CancellationToken,
    resolved: bool,
}

pub struct PaletteSession {
    phase: PalettePhase,
    input: DebouncedInput,
    selection: SelectionState,
    index: StaticIndexBuilder,
    merger: ResultMerger,
    static_items: Arc<[PaletteItem]>,
    settled_query: Option<String>,
    cycle: Option<ActiveCycle>,
    next_cycle: u64,
    page_size: u32,
    token: CancellationToken,
}

impl PaletteSession {
    pub fn new(roles: Arc<dyn RoleContext>, settings: PaletteSettings) -> Self {
        let index = StaticIndexBuilder::new(roles.clone());
        let merger = ResultMerger::new(roles, settings.entity_visibility.clone());
        Self::with_parts(index, merger, &settings)
    }

    pub fn with_parts(
        index: StaticIndexBuilder,
        merger: ResultMerger,
        settings: &PaletteSettings,
    ) -> Self {
        Self {
            phase: PalettePhase::Closed,
            input: DebouncedInput::new(settings.quiet_window),
            selection: SelectionState::default(),
            index,
            merger,
            static_items: Arc::from(Vec::new()),
            settled_query: None,
            cycle: None,
            next_cycle: 0,
            page_size: settings.page_size,
            token: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> PalettePhase {
        self.phase
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase != PalettePhase::Closed
    }

    #[must_use]
    pub fn raw_query(&self) -> &str {
        self.input.raw()
    }

    #[must_use]
    pub fn stable_query(&self) -> &str {
        self.input.stable()
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.selection.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.selection.scroll_offset = offset;
    }

    #[must_use]
    pub fn grouped(&self) -> Vec<GroupBucket<'_>> {
        group_items(&self.selection.results)
    }

    pub fn update(&mut self, event: PaletteEvent) -> Option<PaletteEffect> {
        if !self.is_open() && event != PaletteEvent::Open {
            return None;
        }

        match event {
            PaletteEvent::Open => self.open(),
            PaletteEvent::Close => self.close("dismissed"),
            PaletteEvent::ExternalNavigation => self.close("navigated"),
            PaletteEvent::InsertChar(c) => {
                let mut raw = self.input.raw().to_string();
                raw.push(c);
                return self.edit(raw);
            }
            PaletteEvent::Backspace => {
                let mut raw = self.input.raw().to_string();
                raw.pop();
                return self.edit(raw);
            }
            PaletteEvent::ClearQuery => return self.edit(String::new()),
            PaletteEvent::QuerySettled(generation) => return self.settle(generation),
            PaletteEvent::RemoteLoaded(cycle, results) => self.commit_remote(cycle, &results),
            PaletteEvent::MoveDown => self.selection.move_down(),
            PaletteEvent::MoveUp => self.selection.move_up(),
            PaletteEvent::Hover(index) => self.selection.hover(index),
            PaletteEvent::Confirm => {
                let item = self.selection.active().cloned()?;
                tracing::debug!(id = %item.id, "palette item confirmed");
                self.close("confirmed");
                return Some(PaletteEffect::Run(item.target));
            }
        }
        None
    }

    fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.token = CancellationToken::new();
        self.index.invalidate();
        self.static_items = self.index.items();
        self.selection.replace(regroup(self.static_items.to_vec()));
        self.phase = PalettePhase::Idle;
        tracing::info!(role = ?self.index.role(), items = self.static_items.len(), "palette opened");
    }

    fn close(&mut self, reason: &str) {
        if !self.is_open() {
            return;
        }
        self.token.cancel();
        self.input.reset();
        self.cycle = None;
        self.settled_query = None;
        self.static_items = Arc::from(Vec::new());
        self.selection.clear();
        self.phase = PalettePhase::Closed;
        tracing::info!(reason, "palette closed");
    }

    fn edit(&mut self, raw: String) -> Option<PaletteEffect> {
        if raw == self.input.raw() {
            return None;
        }
        let ticket = self.input.push(raw, &self.token);
        self.phase = PalettePhase::Searching;
        Some(PaletteEffect::Debounce(ticket))
    }

    fn settle(&mut self, generation: u64) -> Option<PaletteEffect> {
        let query = self.input.settle(generation)?.trim().to_string();

        if self.settled_query.as_ref() == Some(&query) {
            self.phase = self.resting_phase();
            return None;
        }
        self.settled_query = Some(query.clone());

        if let Some(previous) = self.cycle.take() {
            previous.token.cancel();
        }
        self.static_items = self.index.items();

        if query.is_empty() {
            self.selection.replace(regroup(self.static_items.to_vec()));
            self.phase = PalettePhase::Idle;
            return None;
        }

        self.next_cycle += 1;
        let id = CycleId(self.next_cycle);
        let token = self.token.child_token();
        let merged = self.merger.merge(&self.static_items, &query, None);
        self.selection.replace(regroup(merged));
        self.cycle = Some(ActiveCycle {
            id,
            query: query.clone(),
            token: token.clone(),
            resolved: false,
        });
        self.phase = PalettePhase::Searching;

        tracing::debug!(cycle = id.0, query = %query, "search cycle started");
        Some(PaletteEffect::Search(FanoutRequest::new(
            id,
            query,
            self.page_size,
            token,
        )))
    }

    fn commit_remote(&mut self, cycle: CycleId, results: &RemoteResults) {
        let Some(active) = self
            .cycle
            .as_mut()
            .filter(|c| c.id == cycle && !c.resolved && !c.token.is_cancelled())
        else {
            tracing::debug!(cycle = cycle.0, "discarding stale search results");
            return;
        };

        let merged = self
            .merger
            .merge(&self.static_items, &active.query, Some(results));
        active.resolved = true;
        self.selection.replace(regroup(merged));
        self.phase = self.resting_phase();
        tracing::debug!(
            cycle = cycle.0,
            results = self.selection.results.len(),
            "search cycle committed"
        );
    }

    fn resting_phase(&self) -> PalettePhase {
        if self.input.is_pending() {
            return PalettePhase::Searching;
        }
        match &self.cycle {
            None => PalettePhase::Idle,
            Some(cycle) if cycle.resolved => PalettePhase::Results,
            Some(_) => PalettePhase::Searching,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::action::Action;
    use crate::app::palette::item::PaletteGroup;
    use crate::app::routes::RouteDefinition;
    use crate::domain::models::{CustomerSummary, DeviceSummary, Role, RoleSnapshot};
    use crate::infrastructure::session::SessionStore;

    fn session(role: RoleSnapshot) -> PaletteSession {
        PaletteSession::new(Arc::new(SessionStore::new(role)), PaletteSettings::default())
    }

    fn three_item_session() -> PaletteSession {
        let roles: Arc<dyn RoleContext> = Arc::new(SessionStore::new(Some(Role::Staff)));
        let routes = ["/x0", "/x1", "/x2"]
            .into_iter()
            .map(|path| RouteDefinition {
                name: &path[1..],
                path,
                required_roles: None,
                icon: "·",
            })
            .collect();
        let index = StaticIndexBuilder::with_registry(roles.clone(), routes, Vec::new());
        let merger = ResultMerger::new(roles, EntityVisibility::default());
        PaletteSession::with_parts(index, merger, &PaletteSettings::default())
    }

    /// Types `text` and lets the final debounce ticket settle.
    fn type_and_settle(session: &mut PaletteSession, text: &str) -> Option<PaletteEffect> {
        let mut ticket = None;
        for c in text.chars() {
            if let Some(PaletteEffect::Debounce(t)) = session.update(PaletteEvent::InsertChar(c)) {
                ticket = Some(t);
            }
        }
        let ticket = ticket.expect("typing produces a debounce ticket");
        session.update(PaletteEvent::QuerySettled(ticket.generation))
    }

    fn search(effect: Option<PaletteEffect>) -> FanoutRequest {
        match effect {
            Some(PaletteEffect::Search(request)) => request,
            other => panic!("expected a search effect, got {other:?}"),
        }
    }

    fn customers(names: &[&str]) -> RemoteResults {
        RemoteResults {
            customers: names
                .iter()
                .enumerate()
                .map(|(i, name)| CustomerSummary {
                    id: format!("{name}-{i}"),
                    name: (*name).to_string(),
                    email: None,
                    phone: None,
                })
                .collect(),
            devices: Vec::new(),
        }
    }

    fn titles(session: &PaletteSession) -> Vec<String> {
        session
            .selection()
            .results
            .iter()
            .map(|i| i.title.clone())
            .collect()
    }

    #[test]
    fn test_open_with_empty_query_shows_static_groups_only() {
        let mut session = session(Some(Role::Admin));
        assert!(session.update(PaletteEvent::Open).is_none());

        assert_eq!(session.phase(), PalettePhase::Idle);
        assert_eq!(session.selection().active_index, 0);
        assert!(!session.selection().is_empty());
        assert!(session
            .grouped()
            .iter()
            .all(|b| matches!(b.group, PaletteGroup::Navigate | PaletteGroup::Actions)));
    }

    #[test]
    fn test_arrow_down_twice_then_enter_runs_third_item() {
        let mut session = three_item_session();
        session.update(PaletteEvent::Open);
        assert_eq!(titles(&session), vec!["x0", "x1", "x2"]);

        session.update(PaletteEvent::MoveDown);
        session.update(PaletteEvent::MoveDown);
        let effect = session.update(PaletteEvent::Confirm);

        assert!(matches!(
            effect,
            Some(PaletteEffect::Run(PaletteTarget::Navigate(ref p))) if p == "/x2"
        ));
        assert_eq!(session.phase(), PalettePhase::Closed);
        assert!(session.update(PaletteEvent::Confirm).is_none());
    }

    #[test]
    fn test_late_result_from_superseded_cycle_is_discarded() {
        let mut session = session(Some(Role::Staff));
        session.update(PaletteEvent::Open);

        let cycle_a = search(type_and_settle(&mut session, "al"));
        let cycle_b = search(type_and_settle(&mut session, "ice"));
        assert_eq!(cycle_b.query, "alice");
        assert!(cycle_a.is_cancelled());
        assert!(!cycle_b.is_cancelled());

        session.update(PaletteEvent::RemoteLoaded(
            cycle_b.cycle,
            customers(&["Alice Martin"]),
        ));
        session.update(PaletteEvent::MoveDown);
        let index_before = session.selection().active_index;

        session.update(PaletteEvent::RemoteLoaded(
            cycle_a.cycle,
            customers(&["Alan Smith", "Alba Reyes"]),
        ));

        assert_eq!(session.phase(), PalettePhase::Results);
        let remote: Vec<_> = session
            .selection()
            .results
            .iter()
            .filter(|i| i.group == PaletteGroup::Customers)
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(remote, vec!["Alice Martin"]);
        assert_eq!(session.selection().active_index, index_before);
    }

    #[test]
    fn test_stale_result_arriving_first_is_also_discarded() {
        let mut session = session(Some(Role::Staff));
        session.update(PaletteEvent::Open);

        let cycle_a = search(type_and_settle(&mut session, "al"));
        let _cycle_b = search(type_and_settle(&mut session, "ice"));

        session.update(PaletteEvent::RemoteLoaded(cycle_a.cycle, customers(&["Alan"])));
        assert_eq!(session.phase(), PalettePhase::Searching);
        assert!(!titles(&session).contains(&"Alan".to_string()));
    }

    #[test]
    fn test_same_stable_query_does_not_start_second_cycle() {
        let mut session = session(Some(Role::Staff));
        session.update(PaletteEvent::Open);

        let cycle = search(type_and_settle(&mut session, "dev"));
        session.update(PaletteEvent::RemoteLoaded(cycle.cycle, RemoteResults::default()));
        let committed = session.selection().results.clone();

        session.update(PaletteEvent::InsertChar('x'));
        let ticket = match session.update(PaletteEvent::Backspace) {
            Some(PaletteEffect::Debounce(t)) => t,
            other => panic!("expected debounce, got {other:?}"),
        };
        assert_eq!(session.phase(), PalettePhase::Searching);

        assert!(session
            .update(PaletteEvent::QuerySettled(ticket.generation))
            .is_none());
        assert_eq!(session.phase(), PalettePhase::Results);
        assert_eq!(session.selection().results, committed);

        // Replaying the same settle emits nothing either.
        assert!(session
            .update(PaletteEvent::QuerySettled(ticket.generation))
            .is_none());
    }

    #[test]
    fn test_customer_results_survive_device_failure() {
        let mut session = session(Some(Role::SupportTeam));
        session.update(PaletteEvent::Open);
        let cycle = search(type_and_settle(&mut session, "zz-customer"));

        session.update(PaletteEvent::RemoteLoaded(
            cycle.cycle,
            customers(&["One", "Two", "Three"]),
        ));

        let groups: Vec<_> = session.selection().results.iter().map(|i| i.group).collect();
        assert_eq!(groups, vec![PaletteGroup::Customers; 3]);
    }

    #[test]
    fn test_close_cancels_in_flight_work_and_isolates_next_session() {
        let mut session = session(Some(Role::Manager));
        session.update(PaletteEvent::Open);
        let cycle = search(type_and_settle(&mut session, "con"));

        let pending = match session.update(PaletteEvent::InsertChar('t')) {
            Some(PaletteEffect::Debounce(t)) => t,
            other => panic!("expected debounce, got {other:?}"),
        };

        session.update(PaletteEvent::Close);
        assert!(cycle.is_cancelled());
        assert!(pending.is_cancelled());
        assert_eq!(session.raw_query(), "");

        session.update(PaletteEvent::Open);
        let fresh = session.selection().results.clone();
        session.update(PaletteEvent::RemoteLoaded(cycle.cycle, customers(&["Contoso"])));
        assert!(session.update(PaletteEvent::QuerySettled(pending.generation)).is_none());

        assert_eq!(session.selection().results, fresh);
        assert_eq!(session.phase(), PalettePhase::Idle);
    }

    #[test]
    fn test_enter_with_no_results_is_ignored() {
        let mut session = session(Some(Role::Staff));
        session.update(PaletteEvent::Open);
        let cycle = search(type_and_settle(&mut session, "qqqqqq"));
        session.update(PaletteEvent::RemoteLoaded(cycle.cycle, RemoteResults::default()));

        assert!(session.selection().is_empty());
        assert!(session.update(PaletteEvent::Confirm).is_none());
        assert!(session.is_open());
    }

    #[test]
    fn test_external_navigation_force_closes() {
        let mut session = session(Some(Role::Staff));
        session.update(PaletteEvent::Open);
        type_and_settle(&mut session, "cu");

        session.update(PaletteEvent::ExternalNavigation);
        assert_eq!(session.phase(), PalettePhase::Closed);
        assert!(session.selection().is_empty());
        assert_eq!(session.stable_query(), "");
    }

    #[test]
    fn test_hover_moves_highlight_without_confirming() {
        let mut session = three_item_session();
        session.update(PaletteEvent::Open);
        assert!(session.update(PaletteEvent::Hover(2)).is_none());
        assert_eq!(session.selection().active_index, 2);
        assert!(session.is_open());
    }

    #[test]
    fn test_entities_hidden_for_customer_role() {
        let mut session = session(Some(Role::Customer));
        session.update(PaletteEvent::Open);
        let cycle = search(type_and_settle(&mut session, "ali"));
        session.update(PaletteEvent::RemoteLoaded(cycle.cycle, customers(&["Alice"])));

        assert!(session.selection().results.iter().all(|i| !i.group.is_entity()));
    }

    #[test]
    fn test_clearing_query_returns_to_idle_without_search() {
        let mut session = session(Some(Role::Admin));
        session.update(PaletteEvent::Open);
        let all = session.selection().results.clone();
        search(type_and_settle(&mut session, "dev"));

        let ticket = match session.update(PaletteEvent::ClearQuery) {
            Some(PaletteEffect::Debounce(t)) => t,
            other => panic!("expected debounce, got {other:?}"),
        };
        assert!(session
            .update(PaletteEvent::QuerySettled(ticket.generation))
            .is_none());
        assert_eq!(session.phase(), PalettePhase::Idle);
        assert_eq!(session.selection().results, all);
    }

    #[test]
    fn test_static_matches_shown_while_remote_in_flight() {
        let mut session = session(Some(Role::Admin));
        session.update(PaletteEvent::Open);
        search(type_and_settle(&mut session, "supp"));

        assert_eq!(session.phase(), PalettePhase::Searching);
        let titles = titles(&session);
        assert!(titles.contains(&"Suppliers".to_string()));
        assert!(titles.contains(&"Support Tickets".to_string()));
    }

    #[test]
    fn test_invoke_targets_pass_through() {
        let mut session = session(None);
        session.update(PaletteEvent::Open);
        type_and_settle(&mut session, "quit");
        let effect = session.update(PaletteEvent::Confirm);
        assert!(matches!(
            effect,
            Some(PaletteEffect::Run(PaletteTarget::Invoke(Action::Quit)))
        ));
    }

    #[test]
    fn test_device_results_follow_customers() {
        let mut session = session(Some(Role::Technician));
        session.update(PaletteEvent::Open);
        let cycle = search(type_and_settle(&mut session, "sn"));

        let mut results = customers(&["Snow Ltd"]);
        results.devices.push(DeviceSummary {
            id: "d1".to_string(),
            serial_number: "SN-1".to_string(),
            model: None,
            customer_name: None,
        });
        session.update(PaletteEvent::RemoteLoaded(cycle.cycle, results));

        let entities: Vec<_> = session
            .selection()
            .results
            .iter()
            .filter(|i| i.group.is_entity())
            .map(|i| i.group)
            .collect();
        assert_eq!(entities, vec![PaletteGroup::Customers, PaletteGroup::Devices]);
    }
}
