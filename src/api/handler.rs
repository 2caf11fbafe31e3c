use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{error, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::api::utils::classify_measurements;
use crate::db::TariffCatalog;
use crate::domain::{self, CalculationRequest};
use crate::models::CalculateResponse;

const SCENARIO: &str = "scenario";
const FEE_TYPE_CODE: &str = "fee_type_code";
const OFFENCE_CLASS: &str = "offence_class";
const ADVOCATE_TYPE: &str = "advocate_type";

/// Fee calculation endpoint
#[tracing::instrument(skip(state, params), fields(scheme_id = scheme_id))]
pub async fn calculate_handler(
    Path(scheme_id): Path<i64>,
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<AppState>,
) -> ApiResult<Json<CalculateResponse>> {
    info!("Processing calculate request");

    let request = build_calculation_request(state.catalog.as_ref(), scheme_id, params).await?;

    let amount = domain::calculate_total(state.catalog.as_ref(), &request)
        .await
        .map_err(|e| {
            error!("Calculation failed: {:?}", e);
            ApiError::from(e)
        })?;

    Ok(Json(CalculateResponse::new(amount)))
}

/// Validate raw query parameters against the tariff catalog
pub async fn build_calculation_request(
    catalog: &dyn TariffCatalog,
    scheme_id: i64,
    params: Vec<(String, String)>,
) -> ApiResult<CalculationRequest> {
    let scheme = catalog
        .scheme(scheme_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Scheme {} not found", scheme_id)))?;

    let mut scenario = None;
    let mut fee_type_code = None;
    let mut offence_class = None;
    let mut advocate_type = None;
    let mut measurements = Vec::new();

    for (name, value) in params {
        match name.as_str() {
            SCENARIO => scenario = Some(value),
            FEE_TYPE_CODE => fee_type_code = Some(value),
            OFFENCE_CLASS => offence_class = Some(value).filter(|v| !v.is_empty()),
            ADVOCATE_TYPE => advocate_type = Some(value).filter(|v| !v.is_empty()),
            _ => measurements.push((name, value)),
        }
    }

    let scenario_raw = scenario.ok_or_else(|| required(SCENARIO))?;
    let scenario_id: i64 = scenario_raw
        .trim()
        .parse()
        .map_err(|_| ApiError::invalid_value(&scenario_raw, SCENARIO))?;
    let scenario = catalog
        .scenario(scenario_id)
        .await?
        .ok_or_else(|| ApiError::invalid_value(&scenario_raw, SCENARIO))?;

    let fee_type_code = fee_type_code.ok_or_else(|| required(FEE_TYPE_CODE))?;
    let fee_type = catalog
        .fee_type_by_code(&fee_type_code)
        .await?
        .ok_or_else(|| ApiError::invalid_value(&fee_type_code, FEE_TYPE_CODE))?;

    if let Some(id) = &offence_class {
        if catalog.offence_class(id).await?.is_none() {
            return Err(ApiError::invalid_value(id, OFFENCE_CLASS));
        }
    }
    if let Some(id) = &advocate_type {
        if catalog.advocate_type(id).await?.is_none() {
            return Err(ApiError::invalid_value(id, ADVOCATE_TYPE));
        }
    }

    let units = catalog.units().await?;
    let modifier_types = catalog.modifier_types().await?;
    let (unit_quantities, modifier_quantities) =
        classify_measurements(&measurements, &units, &modifier_types)?;

    if unit_quantities.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one unit quantity is required".to_string(),
        ));
    }

    info!(
        scheme = %scheme.description,
        scenario = %scenario.name,
        fee_type = %fee_type.code,
        units = unit_quantities.len(),
        modifiers = modifier_quantities.len(),
        "Calculation request validated"
    );

    Ok(CalculationRequest {
        scheme_id: scheme.id,
        scenario_id: scenario.id,
        fee_type,
        offence_class_id: offence_class,
        advocate_type_id: advocate_type,
        unit_quantities,
        modifier_quantities,
    })
}

fn required(field: &str) -> ApiError {
    ApiError::BadRequest(format!("`{}` is required", field))
}
