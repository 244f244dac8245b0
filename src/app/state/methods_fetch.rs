use super::*;

impl AppState {
    /// Starts a new refresh cycle. Any cycle still in flight is superseded:
    /// its result will carry an older generation and be dropped on arrival.
    pub fn begin_refresh(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.generation = self.generation.wrapping_add(1);
        if self.fetch_in_flight {
            tracing::debug!(generation = self.generation, "superseding in-flight refresh");
        }

        if let Some(fix) = self.location.as_ref().map(|resolved| resolved.fix.clone()) {
            self.fetch_forecast(tx, fix);
        } else {
            self.start_location_lookup(tx);
        }
    }

    pub(crate) fn start_location_lookup(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.loading_message = "Detecting location...".to_string();
        self.fetch_in_flight = true;
        let generation = self.generation;
        let chain = self.location_chain.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let resolved = chain.resolve().await;
            let _ = tx2
                .send(AppEvent::LocationResolved {
                    generation,
                    resolved,
                })
                .await;
        });
    }

    pub(crate) fn fetch_forecast(&mut self, tx: &mpsc::Sender<AppEvent>, fix: LocationFix) {
        self.fetch_in_flight = true;
        let generation = self.generation;
        let client = self.forecast_client.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match client.fetch(fix).await {
                Ok(bundle) => AppEvent::FetchSucceeded { generation, bundle },
                Err(err) => AppEvent::FetchFailed {
                    generation,
                    error: format!("{err:#}"),
                },
            };
            let _ = tx2.send(event).await;
        });
    }
}
