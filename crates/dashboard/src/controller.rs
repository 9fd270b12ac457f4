use airquality::{Payload, Query};
use foundation::LatLng;

use crate::error::{GeolocationError, InputError, RequestError};
use crate::map::{DEFAULT_CENTER, DEFAULT_ZOOM, MapOverlays, MapSurface};
use crate::readout::Readout;
use crate::sequence::{Sequencer, Ticket};
use crate::status::{ErrorBanner, Status};
use crate::transport::{Transport, fetch_payload};

/// A lookup the dashboard has issued but not yet received.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub query: Query,
}

/// Owns all display state for one dashboard instance.
pub struct Dashboard<M: MapSurface> {
    map: M,
    overlays: MapOverlays,
    readout: Option<Readout>,
    status: Status,
    banner: ErrorBanner,
    sequencer: Sequencer,
}

impl<M: MapSurface> Dashboard<M> {
    /// Centers `map` on the default location. Status starts as an error until
    /// the first response arrives.
    pub fn new(mut map: M) -> Self {
        map.set_view(DEFAULT_CENTER, DEFAULT_ZOOM);
        Self {
            map,
            overlays: MapOverlays::new(),
            readout: None,
            status: Status::Error,
            banner: ErrorBanner::default(),
            sequencer: Sequencer::new(),
        }
    }

    /// Initial lookup for the default center.
    pub fn start(&mut self) -> PendingRequest {
        self.dispatch(Query::located(DEFAULT_CENTER))
    }

    pub fn submit_address(&mut self, input: &str) -> Result<PendingRequest, InputError> {
        let address = input.trim();
        if address.is_empty() {
            return Err(self.reject(InputError::EmptyAddress));
        }
        Ok(self.dispatch(Query::address(address)))
    }

    pub fn submit_coordinates(
        &mut self,
        lat: &str,
        lng: &str,
    ) -> Result<PendingRequest, InputError> {
        let (lat, lng) = (lat.trim(), lng.trim());
        if lat.is_empty() || lng.is_empty() {
            return Err(self.reject(InputError::MissingCoordinate));
        }
        Ok(self.dispatch(Query::coordinates(lat, lng)))
    }

    pub fn map_clicked(&mut self, at: LatLng) -> PendingRequest {
        self.dispatch(Query::clicked(at))
    }

    /// Handles the result of a device location request.
    pub fn located(&mut self, fix: Result<LatLng, GeolocationError>) -> Option<PendingRequest> {
        match fix {
            Ok(at) => Some(self.dispatch(Query::located(at))),
            Err(err) => {
                tracing::warn!(error = %err, "geolocation failed");
                self.banner.show(err.to_string());
                None
            }
        }
    }

    /// Clears the banner and issues a ticket for `query`. Any request still in
    /// flight is cancelled.
    pub fn dispatch(&mut self, query: Query) -> PendingRequest {
        self.banner.clear();
        let ticket = self.sequencer.issue();
        tracing::info!(seq = ticket.seq, %query, "dispatching lookup");
        PendingRequest { ticket, query }
    }

    /// Applies the outcome of a request. Returns false when the outcome was
    /// stale and left the display untouched.
    pub fn complete(&mut self, ticket: &Ticket, outcome: Result<Payload, RequestError>) -> bool {
        if matches!(outcome, Err(RequestError::Cancelled)) || !self.sequencer.finish(ticket) {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.sequencer.latest(),
                "discarding stale response"
            );
            return false;
        }

        match outcome {
            Ok(payload) => {
                self.status = Status::Active;
                self.render(&payload);
            }
            Err(err) => {
                tracing::warn!(seq = ticket.seq, error = %err, "lookup failed");
                self.status = Status::Error;
                self.banner.show(err.banner_text());
            }
        }
        true
    }

    /// Shows `payload` in the readout and on the map.
    pub fn render(&mut self, payload: &Payload) {
        let readout = Readout::from_payload(payload);
        self.overlays
            .show(&mut self.map, readout.position, readout.category);
        self.readout = Some(readout);
    }

    pub fn dismiss_error(&mut self) {
        self.banner.clear();
    }

    pub fn readout(&self) -> Option<&Readout> {
        self.readout.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    fn reject(&mut self, err: InputError) -> InputError {
        self.banner.show(err.to_string());
        err
    }
}

/// Runs `pending` to completion against an owned dashboard.
///
/// Front ends that keep the dashboard behind a `RefCell` call
/// [`fetch_payload`] and [`Dashboard::complete`] separately so no borrow is
/// held across the await.
pub async fn run<M, T>(dashboard: &mut Dashboard<M>, transport: &T, pending: PendingRequest) -> bool
where
    M: MapSurface,
    T: Transport + ?Sized,
{
    let outcome = fetch_payload(transport, &pending.query, &pending.ticket.token).await;
    dashboard.complete(&pending.ticket, outcome)
}
