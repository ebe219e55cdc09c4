use crate::models::query::{LimitOption, QueryState, SearchField, UiState};
use crate::services::catalog::CatalogSource;
use crate::services::pipeline::{CombineLatest, Debouncer, Distinct, RequestSequence};
use crate::utils::validation::{validate_search_text, ValidationError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

pub type Catalog = Arc<dyn CatalogSource + Send + Sync>;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub debounce: Duration,
    pub initial_limit: LimitOption,
    pub initial_field: SearchField,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            initial_limit: LimitOption::default(),
            initial_field: SearchField::default(),
        }
    }
}

#[derive(Debug)]
enum Input {
    Text(String),
    Limit(LimitOption),
    Field(SearchField),
    /// Drop whatever request is in flight.
    Supersede,
}

/// Owns the three query inputs and the page state derived from them.
///
/// Inputs are forwarded to a background task that debounces the text,
/// drops repeated values and recombines the latest limit/text/field into a
/// catalog request. Results land in a `watch` channel so every write to the
/// page state is serialized.
pub struct QueryController {
    inputs: mpsc::UnboundedSender<Input>,
    state: Arc<watch::Sender<UiState>>,
    sequence: Arc<RequestSequence>,
}

impl QueryController {
    pub fn spawn(catalog: Catalog, options: ControllerOptions) -> Self {
        let (inputs, rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(UiState::default());
        let state = Arc::new(state);
        let sequence = Arc::new(RequestSequence::default());

        let mut combine = CombineLatest::default();
        combine.set_limit(options.initial_limit);
        combine.set_field(options.initial_field);

        let pipeline = Pipeline {
            inputs: rx,
            catalog,
            state: state.clone(),
            sequence: sequence.clone(),
            text: Debouncer::new(options.debounce),
            text_distinct: Distinct::seeded(String::new()),
            limit_distinct: Distinct::seeded(options.initial_limit),
            field_distinct: Distinct::seeded(options.initial_field),
            combine,
            in_flight: None,
        };
        tokio::spawn(pipeline.run());

        info!(
            "Query controller started (debounce {:?}, limit {}, field {})",
            options.debounce,
            options.initial_limit,
            options.initial_field.label()
        );

        Self {
            inputs,
            state,
            sequence,
        }
    }

    /// Validates and feeds new search text. A validation failure is shown
    /// immediately and keeps the text out of the request pipeline.
    pub fn set_search_text(&self, text: impl Into<String>) -> Result<(), ValidationError> {
        let text = text.into();

        match validate_search_text(&text) {
            Ok(()) => {
                let cleared = text.is_empty();
                let sequence = &self.sequence;
                self.state.send_modify(|ui| {
                    // no request follows empty text, so retire the one in flight
                    if cleared {
                        sequence.next();
                    }
                    ui.show_error("");
                });
                if cleared {
                    self.send(Input::Supersede);
                }
                self.send(Input::Text(text));
                Ok(())
            }
            Err(err) => {
                debug!("Rejected search text {:?}: {}", text, err);
                let sequence = &self.sequence;
                self.state.send_modify(|ui| {
                    sequence.next();
                    ui.show_error(err.to_string());
                });
                self.send(Input::Supersede);
                self.send(Input::Text(String::new()));
                Err(err)
            }
        }
    }

    pub fn set_limit(&self, limit: LimitOption) {
        self.send(Input::Limit(limit));
    }

    pub fn set_field(&self, field: SearchField) {
        self.send(Input::Field(field));
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    fn send(&self, input: Input) {
        if let Err(e) = self.inputs.send(input) {
            warn!("Query pipeline is gone, dropping {:?}", e.0);
        }
    }
}

struct Pipeline {
    inputs: mpsc::UnboundedReceiver<Input>,
    catalog: Catalog,
    state: Arc<watch::Sender<UiState>>,
    sequence: Arc<RequestSequence>,
    text: Debouncer<String>,
    text_distinct: Distinct<String>,
    limit_distinct: Distinct<LimitOption>,
    field_distinct: Distinct<SearchField>,
    combine: CombineLatest,
    in_flight: Option<JoinHandle<()>>,
}

impl Pipeline {
    async fn run(mut self) {
        loop {
            let deadline = self.text.deadline();

            tokio::select! {
                input = self.inputs.recv() => match input {
                    Some(input) => self.on_input(input),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(text) = self.text.take_due(Instant::now()) {
                        self.on_text(text);
                    }
                }
            }
        }

        self.cancel_in_flight();
        debug!("Query pipeline stopped");
    }

    fn on_input(&mut self, input: Input) {
        match input {
            Input::Text(text) => self.text.push(text, Instant::now()),
            Input::Limit(limit) => {
                if self.limit_distinct.accept(&limit) {
                    let query = self.combine.set_limit(limit);
                    self.dispatch(query);
                }
            }
            Input::Field(field) => {
                if self.field_distinct.accept(&field) {
                    let query = self.combine.set_field(field);
                    self.dispatch(query);
                }
            }
            Input::Supersede => self.cancel_in_flight(),
        }
    }

    fn on_text(&mut self, text: String) {
        if !self.text_distinct.accept(&text) || text.is_empty() {
            return;
        }
        let query = self.combine.set_text(text);
        self.dispatch(query);
    }

    fn dispatch(&mut self, query: Option<QueryState>) {
        let Some(query) = query else {
            return;
        };

        // unreachable while empty text is filtered upstream; kept as the combined-trigger rule
        if query.search_text.is_empty() {
            self.state.send_modify(|ui| ui.books_list.clear());
            return;
        }

        self.cancel_in_flight();
        let tag = self.sequence.next();
        info!(
            "Fetching books for {:?} (limit {}, field {}) as request {}",
            query.search_text, query.limit, query.field, tag
        );

        let catalog = self.catalog.clone();
        let state = self.state.clone();
        let sequence = self.sequence.clone();

        self.in_flight = Some(tokio::spawn(async move {
            let result = catalog
                .fetch_books(&query.search_text, query.limit, query.field)
                .await;

            let applied = state.send_if_modified(|ui| {
                if !sequence.is_current(tag) {
                    return false;
                }
                match result {
                    Ok(books) => {
                        info!("Request {} returned {} books", tag, books.len());
                        ui.show_books(books);
                    }
                    Err(e) => {
                        warn!("Request {} failed: {}", tag, e);
                        ui.show_error(e.to_string());
                    }
                }
                true
            });

            if !applied {
                debug!("Discarded stale response for request {}", tag);
            }
        }));
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
