//! Record variants and BOM root objects.
//!
//! A tree node is one of five line-item kinds. The kind is never inferred from
//! field presence; it comes from classifying the record identifier against
//! object metadata (see `bomview_utils::bom::registry`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Field api names specific to configuration lines
pub mod configuration_fields {
    pub const UNIQUE_ID: &str = "LGK__UniqueId__c";
    pub const BOM_TYPE: &str = "LGK__Type__c";
    pub const EXTENDED_INFORMATION: &str = "LGK__Extended_Information__c";
    pub const PRODUCT_ID: &str = "Product__c";
    pub const REVENUE_IMPACT: &str = "Revenue_Impact__c";
    pub const DESCRIPTION: &str = "Description__c";
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown object type: {0}")]
pub struct UnknownObjectType(pub String);

/// The record kinds a BOM tree node can represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[serde(rename = "LGK__ConfigurationLineItem__c")]
    ConfigurationLine,
    #[serde(rename = "SBQQ__QuoteLine__c")]
    QuoteLine,
    #[serde(rename = "OrderItem")]
    OrderLine,
    #[serde(rename = "OpportunityLineItem")]
    OpportunityLine,
    #[serde(rename = "SalesAgreementProduct")]
    SalesAgreementLine,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::ConfigurationLine,
        Variant::QuoteLine,
        Variant::OrderLine,
        Variant::OpportunityLine,
        Variant::SalesAgreementLine,
    ];

    /// Object api name on the host platform
    pub fn api_name(self) -> &'static str {
        match self {
            Self::ConfigurationLine => "LGK__ConfigurationLineItem__c",
            Self::QuoteLine => "SBQQ__QuoteLine__c",
            Self::OrderLine => "OrderItem",
            Self::OpportunityLine => "OpportunityLineItem",
            Self::SalesAgreementLine => "SalesAgreementProduct",
        }
    }

    pub fn from_api_name(api_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.api_name() == api_name)
    }

    /// Relationship under which the line's product record is nested
    pub fn product_relationship(self) -> &'static str {
        match self {
            Self::ConfigurationLine => "Product__r",
            Self::QuoteLine => "SBQQ__Product__r",
            Self::OrderLine | Self::OpportunityLine => "Product2",
            Self::SalesAgreementLine => "Product",
        }
    }

    pub fn is_sales_line(self) -> bool {
        !matches!(self, Self::ConfigurationLine)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for Variant {
    type Err = UnknownObjectType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_api_name(s).ok_or_else(|| UnknownObjectType(s.to_string()))
    }
}

/// Sales documents a BOM can be opened from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootObject {
    Quote,
    Order,
    Opportunity,
    SalesAgreement,
}

impl RootObject {
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Quote => "SBQQ__Quote__c",
            Self::Order => "Order",
            Self::Opportunity => "Opportunity",
            Self::SalesAgreement => "SalesAgreement",
        }
    }

    pub fn from_api_name(api_name: &str) -> Option<Self> {
        [Self::Quote, Self::Order, Self::Opportunity, Self::SalesAgreement]
            .into_iter()
            .find(|r| r.api_name() == api_name)
    }

    /// Related list whose display columns drive the table layout
    pub fn related_list_id(self) -> &'static str {
        match self {
            Self::Quote => "SBQQ__LineItems__r",
            Self::Order => "OrderItems",
            Self::Opportunity => "OpportunityLineItems",
            // never resolves; sales agreements rely on the host's override list
            Self::SalesAgreement => "SalesAgreementProducts_WRONG",
        }
    }

    /// Line-item variant listed under this root
    pub fn line_variant(self) -> Variant {
        match self {
            Self::Quote => Variant::QuoteLine,
            Self::Order => Variant::OrderLine,
            Self::Opportunity => Variant::OpportunityLine,
            Self::SalesAgreement => Variant::SalesAgreementLine,
        }
    }
}

/// The record a BOM view is opened on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootRecord {
    pub object: RootObject,
    pub id: String,
}

impl RootRecord {
    pub fn new(object: RootObject, id: impl Into<String>) -> Self {
        Self {
            object,
            id: id.into(),
        }
    }
}
