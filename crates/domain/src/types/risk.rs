//! Risk scoring records (`BO_Riesgo*` custom business objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::datetime::parse_odata_datetime;

/// Records that carry a `LastChangeDateTime` used for recency ordering.
pub trait ChangeTracked {
    fn last_change_date_time(&self) -> Option<&str>;

    /// Parsed `LastChangeDateTime`; `None` when absent or unparseable.
    fn last_changed_at(&self) -> Option<DateTime<Utc>> {
        self.last_change_date_time().and_then(parse_odata_datetime)
    }
}

/// Aggregate advisory risk (`BO_RiesgoAsesoriamientoRootCollection`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskTotal {
    #[serde(rename = "ObjectID", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(rename = "IDOpp", default, skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<String>,
    #[serde(rename = "IDTicket", default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    #[serde(
        rename = "z_PuntajeAsesoramiento_KUT",
        default,
        with = "crate::utils::serde::lenient_f64"
    )]
    pub advisory_score: Option<f64>,
    #[serde(
        rename = "z_PuntajeRiesgoCliente_KUT",
        default,
        with = "crate::utils::serde::lenient_f64"
    )]
    pub customer_score: Option<f64>,
    #[serde(
        rename = "z_PuntajeRiesgoAutomatico_KUT",
        default,
        with = "crate::utils::serde::lenient_f64"
    )]
    pub automatic_score: Option<f64>,
    #[serde(rename = "z_NivelRiesgo_KUT", default, skip_serializing_if = "Option::is_none")]
    pub risk_level_text: Option<String>,
    #[serde(rename = "z_Observaciones_KUT", default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(rename = "LastChangeDateTime", default, skip_serializing_if = "Option::is_none")]
    pub last_change_date_time: Option<String>,
}

impl RiskTotal {
    /// Level derived from the advisory score (absent score counts as 0).
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.advisory_score.unwrap_or(0.0))
    }
}

/// Customer risk root (`BO_RiesgoCustomerRootCollection`) with its detail rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRisk {
    #[serde(rename = "ObjectID", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(rename = "IDOpp", default, skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<String>,
    #[serde(rename = "IDTicket", default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    #[serde(rename = "z_PuntajeRiesgo_KUT", default, with = "crate::utils::serde::lenient_f64")]
    pub risk_score: Option<f64>,
    #[serde(rename = "z_TipoCliente_KUT", default, skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
    #[serde(rename = "z_Observaciones_KUT", default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(rename = "LastChangeDateTime", default, skip_serializing_if = "Option::is_none")]
    pub last_change_date_time: Option<String>,
    /// Filled from `BO_RiesgoCustomerRiesgosClienteCollection`, never by the
    /// root query itself.
    #[serde(default)]
    pub detalle: Vec<CustomerRiskDetail>,
}

/// Detail row of a customer risk (`BO_RiesgoCustomerRiesgosClienteCollection`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRiskDetail {
    #[serde(rename = "ObjectID", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(rename = "ParentObjectID", default, skip_serializing_if = "Option::is_none")]
    pub parent_object_id: Option<String>,
    #[serde(rename = "z_Campo_KUT", default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "z_Valor_KUT", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "z_Puntaje_KUT", default, with = "crate::utils::serde::lenient_f64")]
    pub score: Option<f64>,
    #[serde(rename = "z_Peso_KUT", default, with = "crate::utils::serde::lenient_f64")]
    pub weight: Option<f64>,
    #[serde(rename = "z_Descripcion_KUT", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Know-your-customer risk (`BO_RiesgoCustomerKYMRootCollection`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KymRisk {
    #[serde(rename = "ObjectID", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(rename = "IDOpp", default, skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<String>,
    #[serde(rename = "IDTicket", default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    #[serde(rename = "IDCustomer", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(rename = "z_campo_KUT", default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "z_campoRiesgo_KUT", default, skip_serializing_if = "Option::is_none")]
    pub risk_field: Option<String>,
    #[serde(rename = "z_FactorCorrectord_KUT", default, with = "crate::utils::serde::lenient_f64")]
    pub correction_factor: Option<f64>,
    #[serde(rename = "z_puntajed_KUT", default, with = "crate::utils::serde::lenient_f64")]
    pub score: Option<f64>,
    #[serde(rename = "z_Comentario_KUT", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "z_TipoAnalisis_KUT", default, skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<String>,
    #[serde(rename = "z_ResultadoAnalisis_KUT", default, skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<String>,
    #[serde(rename = "LastChangeDateTime", default, skip_serializing_if = "Option::is_none")]
    pub last_change_date_time: Option<String>,
}

impl ChangeTracked for RiskTotal {
    fn last_change_date_time(&self) -> Option<&str> {
        self.last_change_date_time.as_deref()
    }
}

impl ChangeTracked for CustomerRisk {
    fn last_change_date_time(&self) -> Option<&str> {
        self.last_change_date_time.as_deref()
    }
}

impl ChangeTracked for KymRisk {
    fn last_change_date_time(&self) -> Option<&str> {
        self.last_change_date_time.as_deref()
    }
}

/// Banded risk level used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "MUY BAJO")]
    VeryLow,
    #[serde(rename = "BAJO")]
    Low,
    #[serde(rename = "MEDIO")]
    Medium,
    #[serde(rename = "ALTO")]
    High,
    #[serde(rename = "MUY ALTO")]
    VeryHigh,
}

impl RiskLevel {
    /// Bands: `>= 8` very high, `>= 6` high, `>= 4` medium, `>= 2` low.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::VeryHigh
        } else if score >= 6.0 {
            Self::High
        } else if score >= 4.0 {
            Self::Medium
        } else if score >= 2.0 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "MUY BAJO",
            Self::Low => "BAJO",
            Self::Medium => "MEDIO",
            Self::High => "ALTO",
            Self::VeryHigh => "MUY ALTO",
        }
    }
}

/// The three risk records for one opportunity/ticket pair, fetched together.
///
/// A fetcher that failed leaves its record `None` and its message in the
/// matching `*_error` field; the others are unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub opportunity_id: String,
    pub service_request_id: String,
    pub risk_total: Option<RiskTotal>,
    pub customer_risk: Option<CustomerRisk>,
    pub kym_risk: Option<KymRisk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_total_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_risk_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kym_risk_error: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl RiskSummary {
    pub fn has_errors(&self) -> bool {
        self.risk_total_error.is_some()
            || self.customer_risk_error.is_some()
            || self.kym_risk_error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn risk_level_bands() {
        assert_eq!(RiskLevel::from_score(9.1), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::from_score(8.0), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::from_score(6.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(5.99), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(2.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::VeryLow);
        assert_eq!(RiskLevel::High.label(), "ALTO");
    }

    #[test]
    fn risk_total_decodes_decimal_strings() {
        let total: RiskTotal = serde_json::from_value(json!({
            "IDOpp": "OPP123",
            "IDTicket": "SR-1",
            "z_PuntajeAsesoramiento_KUT": "6.50",
            "z_PuntajeRiesgoCliente_KUT": 3,
            "LastChangeDateTime": "/Date(1700000000000)/"
        }))
        .unwrap();

        assert_eq!(total.advisory_score, Some(6.5));
        assert_eq!(total.customer_score, Some(3.0));
        assert_eq!(total.automatic_score, None);
        assert_eq!(total.risk_level(), RiskLevel::High);
        assert_eq!(total.last_changed_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn missing_score_is_very_low() {
        assert_eq!(RiskTotal::default().risk_level(), RiskLevel::VeryLow);
    }

    #[test]
    fn customer_risk_root_decodes_without_detail() {
        let risk: CustomerRisk = serde_json::from_value(json!({
            "ObjectID": "ROOT1",
            "z_PuntajeRiesgo_KUT": 4.25
        }))
        .unwrap();

        assert_eq!(risk.object_id.as_deref(), Some("ROOT1"));
        assert!(risk.detalle.is_empty());
    }

    #[test]
    fn risk_level_serializes_as_label() {
        assert_eq!(serde_json::to_value(RiskLevel::VeryHigh).unwrap(), json!("MUY ALTO"));
    }
}
