use super::*;
use crate::domain::{Category, MovieId};
use crate::gateway::fake::{page_ids, Call, FakeGateway};
use crate::store::Transition;
use std::time::Duration;

fn start(config: OrchestratorConfig) -> (Store, Arc<FakeGateway>, Orchestrator) {
    let store = Store::default();
    let gateway = Arc::new(FakeGateway::default());
    let orchestrator = Orchestrator::spawn(&store, gateway.clone(), config);
    (store, gateway, orchestrator)
}

/// Lets every ready task run without moving the clock.
async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

async fn run_for(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn committed(store: &Store, name: &str) -> usize {
    store.log().iter().filter(|commit| commit.transition.name() == name).count()
}

#[tokio::test(start_paused = true)]
async fn later_category_request_wins_over_slower_earlier_one() {
    let (store, gateway, _orchestrator) = start(OrchestratorConfig::default());
    gateway.delay_category(Category::Popular, 1, Duration::from_millis(300));
    gateway.delay_category(Category::Popular, 2, Duration::from_millis(100));

    store.dispatch(Transition::RequestCategoryPage { category: Category::Popular, page: 1 });
    settle().await;
    store.dispatch(Transition::RequestCategoryPage { category: Category::Popular, page: 2 });
    run_for(400).await;

    let popular = store.select(|s| s.popular.clone());
    assert_eq!(popular.page, 2);
    assert!(!popular.loading);
    assert_eq!(popular.page_to_movie_ids.keys().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(popular.current_ids(), Some(&page_ids(Category::Popular, 2)[..]));
    assert_eq!(committed(&store, "receiveCategoryPageSuccess"), 1);
    assert_eq!(gateway.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn per_category_scope_keeps_independent_fetches() {
    let (store, gateway, _orchestrator) = start(OrchestratorConfig::default());
    gateway.delay_category(Category::Popular, 1, Duration::from_millis(300));

    store.dispatch(Transition::RequestCategoryPage { category: Category::Popular, page: 1 });
    settle().await;
    store.dispatch(Transition::RequestCategoryPage { category: Category::AiringNow, page: 1 });
    run_for(400).await;

    assert!(store.select(|s| s.popular.has_cached_page()));
    assert!(store.select(|s| s.airing_now.has_cached_page()));
    assert_eq!(committed(&store, "receiveCategoryPageSuccess"), 2);
}

#[tokio::test(start_paused = true)]
async fn global_scope_cancels_across_categories() {
    let config = OrchestratorConfig {
        cancel_scope: CancelScope::Global,
        ..OrchestratorConfig::default()
    };
    let (store, gateway, _orchestrator) = start(config);
    gateway.delay_category(Category::Popular, 1, Duration::from_millis(300));

    store.dispatch(Transition::RequestCategoryPage { category: Category::Popular, page: 1 });
    settle().await;
    store.dispatch(Transition::RequestCategoryPage { category: Category::AiringNow, page: 1 });
    run_for(400).await;

    assert!(store.select(|s| s.airing_now.has_cached_page()));
    let popular = store.select(|s| s.popular.clone());
    assert!(popular.page_to_movie_ids.is_empty());
    // The abandoned fetch commits nothing, so its slice keeps the request's flag.
    assert!(popular.loading);
    assert_eq!(committed(&store, "receiveCategoryPageSuccess"), 1);
}

#[tokio::test(start_paused = true)]
async fn category_failure_is_tagged_with_requested_category() {
    let (store, gateway, _orchestrator) = start(OrchestratorConfig::default());
    gateway.fail_category(Category::AiringNow);

    store.dispatch(Transition::RequestCategoryPage { category: Category::AiringNow, page: 3 });
    settle().await;

    let (airing, popular) = store.select(|s| (s.airing_now.clone(), s.popular.clone()));
    assert!(!airing.loading);
    assert_eq!(airing.error.as_deref(), Some("TMDB request failed with status 500"));
    assert!(popular.error.is_none());

    store.dispatch(Transition::RequestCategoryPage { category: Category::Popular, page: 1 });
    settle().await;
    assert!(store.select(|s| s.popular.has_cached_page()));
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_issue_one_search_for_final_query() {
    let (store, gateway, _orchestrator) = start(OrchestratorConfig::default());

    for text in ["m", "ma", "mat", "matrix"] {
        store.dispatch(Transition::SetSearchQuery(text.to_string()));
        run_for(100).await;
    }
    run_for(399).await;
    assert!(gateway.search_calls().is_empty());

    run_for(2).await;
    assert_eq!(gateway.search_calls(), vec!["matrix".to_string()]);
    let search = store.select(|s| s.search.clone());
    assert!(!search.loading);
    assert_eq!(search.result_ids, vec![906]);
}

#[tokio::test(start_paused = true)]
async fn short_query_clears_without_network() {
    let (store, gateway, _orchestrator) = start(OrchestratorConfig::default());
    store.dispatch(Transition::SetSearchQuery("dune".to_string()));
    run_for(600).await;
    assert_eq!(store.select(|s| s.search.result_ids.len()), 1);

    store.dispatch(Transition::SetSearchQuery("d".to_string()));
    assert!(store.select(|s| s.search.result_ids.is_empty() && !s.search.loading));

    run_for(600).await;
    assert_eq!(gateway.search_calls(), vec!["dune".to_string()]);
    assert_eq!(committed(&store, "clearSearchResults"), 1);
}

#[tokio::test(start_paused = true)]
async fn sixth_search_in_window_is_delayed_not_dropped() {
    let (store, gateway, _orchestrator) = start(OrchestratorConfig::default());
    let queries = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];

    for query in queries {
        store.dispatch(Transition::SetSearchQuery(query.to_string()));
        run_for(600).await;
    }
    // Starts at 500, 1100, 1700, 2300, 2900; the sixth is due at 3500.
    run_for(1_400).await;
    assert_eq!(gateway.search_calls().len(), 5);
    assert!(store.select(|s| s.search.loading));

    run_for(5_499).await;
    assert_eq!(gateway.search_calls().len(), 5);

    run_for(2).await;
    assert_eq!(gateway.search_calls().len(), 6);
    assert_eq!(gateway.search_calls()[5], "foxtrot");
    assert_eq!(store.select(|s| s.search.result_ids.clone()), vec![907]);
}

#[tokio::test(start_paused = true)]
async fn stale_search_response_never_lands() {
    let (store, gateway, _orchestrator) = start(OrchestratorConfig::default());
    gateway.delay_search("cat", Duration::from_millis(1_000));

    store.dispatch(Transition::SetSearchQuery("cat".to_string()));
    run_for(700).await;
    store.dispatch(Transition::SetSearchQuery("dogs".to_string()));
    run_for(600).await;
    assert_eq!(store.select(|s| s.search.result_ids.clone()), vec![904]);

    run_for(300).await;
    let (ids, has_cat) = store.select(|s| (s.search.result_ids.clone(), s.entities.contains_key(&903)));
    assert_eq!(ids, vec![904]);
    assert!(!has_cat);
    assert_eq!(gateway.search_calls(), vec!["cat".to_string(), "dogs".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn stale_search_failure_is_dropped_and_routine_survives_errors() {
    let (store, gateway, _orchestrator) = start(OrchestratorConfig::default());
    gateway.fail_search("boom");
    gateway.delay_search("boom", Duration::from_millis(1_000));

    store.dispatch(Transition::SetSearchQuery("boom".to_string()));
    run_for(700).await;
    store.dispatch(Transition::SetSearchQuery("fine".to_string()));
    run_for(1_000).await;

    let search = store.select(|s| s.search.clone());
    assert!(search.error.is_none());
    assert_eq!(search.result_ids, vec![904]);

    gateway.fail_search("oops");
    store.dispatch(Transition::SetSearchQuery("oops".to_string()));
    run_for(600).await;
    let search = store.select(|s| s.search.clone());
    assert_eq!(search.error.as_deref(), Some("TMDB request timed out."));
    assert!(!search.loading);
}

#[tokio::test(start_paused = true)]
async fn cached_details_short_circuit_the_network() {
    let (store, gateway, _orchestrator) = start(OrchestratorConfig::default());

    store.dispatch(Transition::RequestMovieDetails(42));
    settle().await;
    assert_eq!(gateway.calls(), vec![Call::Details(42)]);

    store.dispatch(Transition::RequestMovieDetails(42));
    assert!(store.select(|s| s.details[&42].loading));
    settle().await;

    assert_eq!(gateway.calls().len(), 1);
    assert_eq!(committed(&store, "receiveMovieDetailsSuccess"), 2);
    let entry = store.select(|s| s.details[&42].clone());
    assert!(!entry.loading);
    assert_eq!(entry.data.map(|d| d.summary.title), Some("Details 42".to_string()));
}

#[tokio::test(start_paused = true)]
async fn invalid_or_failing_details_surface_as_errors() {
    let (store, gateway, _orchestrator) = start(OrchestratorConfig::default());
    gateway.fail_details(7);

    store.dispatch(Transition::RequestMovieDetails(0));
    store.dispatch(Transition::RequestMovieDetails(7));
    settle().await;

    let (zero, seven) = store.select(|s| (s.details[&0].clone(), s.details[&7].clone()));
    assert_eq!(zero.error.as_deref(), Some("Invalid movie id."));
    assert_eq!(seven.error.as_deref(), Some("TMDB request failed with status 404"));
    assert!(!seven.loading);
    assert_eq!(gateway.calls(), vec![Call::Details(7)]);
}

#[tokio::test(start_paused = true)]
async fn shutdown_abandons_in_flight_work() {
    let (store, gateway, orchestrator) = start(OrchestratorConfig::default());
    gateway.delay_details(Duration::from_millis(200));

    store.dispatch(Transition::RequestMovieDetails(5 as MovieId));
    settle().await;
    orchestrator.shutdown();
    run_for(500).await;

    assert!(store.select(|s| s.details[&5].loading));
    assert_eq!(committed(&store, "receiveMovieDetailsSuccess"), 0);
}
