//! JSON request and response contract for the wrapping service.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{OptimizeOptions, RouteOptimizer};
use crate::error::{Result, RoutingError};
use crate::models::{GeoPoint, OptimizationResult, Pickup, PlanSummary, Route};

/// An optimization request as received from the wrapping service.
///
/// The depot is kept as raw JSON so a missing or non-numeric depot is
/// reported as a validation failure rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizeRequest {
    /// `{ "lat": .., "lon": .. }`
    pub depot: Option<Value>,
    /// Pickups to route.
    pub pickups: Vec<Pickup>,
    /// Per-request options.
    pub options: OptimizeOptions,
}

impl OptimizeRequest {
    /// Validates and returns the depot.
    pub fn depot(&self) -> Result<GeoPoint> {
        parse_depot(self.depot.as_ref())
    }
}

fn parse_depot(raw: Option<&Value>) -> Result<GeoPoint> {
    let invalid = |reason: &str| RoutingError::InvalidDepot {
        reason: reason.to_owned(),
    };

    let obj = match raw {
        None | Some(Value::Null) => return Err(invalid("depot is required")),
        Some(Value::Object(obj)) => obj,
        Some(_) => return Err(invalid("depot must be an object with lat and lon")),
    };
    let lat = obj
        .get("lat")
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid("lat must be a number"))?;
    let lon = obj
        .get("lon")
        .or_else(|| obj.get("lng"))
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid("lon must be a number"))?;

    GeoPoint::new(lat, lon).ok_or_else(|| invalid("coordinates out of range"))
}

/// The response returned to the wrapping service.
///
/// On success `routes` and `summary` are present; on failure only `success`
/// and a human-readable `message` are.
///
/// # Examples
///
/// ```
/// use pickup_routing::error::RoutingError;
/// use pickup_routing::optimizer::OptimizationResponse;
///
/// let resp = OptimizationResponse::failure(&RoutingError::NoPickups);
/// let json = serde_json::to_value(&resp).unwrap();
/// assert_eq!(json["success"], false);
/// assert!(json.get("routes").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    routes: Option<Vec<Route>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PlanSummary>,
}

impl OptimizationResponse {
    /// A successful response carrying the plan.
    pub fn success(result: OptimizationResult) -> Self {
        let (routes, summary) = result.into_parts();
        Self {
            success: true,
            message: None,
            routes: Some(routes),
            summary: Some(summary),
        }
    }

    /// A failed response describing `error`.
    pub fn failure(error: &RoutingError) -> Self {
        Self {
            success: false,
            message: Some(capitalize(&error.to_string())),
            routes: None,
            summary: None,
        }
    }

    /// Returns `true` if a plan was produced.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Failure message, if the request was rejected.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Planned routes, if successful.
    pub fn routes(&self) -> Option<&[Route]> {
        self.routes.as_deref()
    }

    /// Plan summary, if successful.
    pub fn summary(&self) -> Option<&PlanSummary> {
        self.summary.as_ref()
    }
}

impl From<Result<OptimizationResult>> for OptimizationResponse {
    fn from(result: Result<OptimizationResult>) -> Self {
        match result {
            Ok(plan) => Self::success(plan),
            Err(err) => {
                warn!(error = %err, "route optimization rejected");
                Self::failure(&err)
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl RouteOptimizer {
    /// Runs a parsed request.
    pub fn handle(&self, request: &OptimizeRequest) -> OptimizationResponse {
        request
            .depot()
            .and_then(|depot| self.optimize(depot, &request.pickups, &request.options))
            .into()
    }

    /// Parses a JSON request body and runs it.
    ///
    /// ```
    /// use pickup_routing::optimizer::{OptimizerConfig, RouteOptimizer};
    ///
    /// let optimizer = RouteOptimizer::new(OptimizerConfig::default().with_seed(3));
    /// let resp = optimizer.optimize_json(r#"{
    ///     "depot": { "lat": 0.0, "lon": 0.0 },
    ///     "pickups": [ { "id": 1, "lat": 0.0, "lon": 1.0, "donorName": "Ana" } ],
    ///     "options": { "vehicleType": "van" }
    /// }"#);
    /// assert!(resp.is_success());
    /// assert_eq!(resp.routes().unwrap()[0].pickups()[0].metadata()["donorName"], "Ana");
    /// ```
    pub fn optimize_json(&self, body: &str) -> OptimizationResponse {
        match serde_json::from_str::<OptimizeRequest>(body) {
            Ok(request) => self.handle(&request),
            Err(err) => {
                let rejected: Result<OptimizationResult> = Err(RoutingError::MalformedRequest(err));
                rejected.into()
            }
        }
    }
}
