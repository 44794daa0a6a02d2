use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size variants a product can be carried in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeVariant {
    Standard,
    Wide,
    UltraWide,
    Regular,
}

impl fmt::Display for SizeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeVariant::Standard => write!(f, "standard"),
            SizeVariant::Wide => write!(f, "wide"),
            SizeVariant::UltraWide => write!(f, "ultra-wide"),
            SizeVariant::Regular => write!(f, "regular"),
        }
    }
}

impl FromStr for SizeVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(SizeVariant::Standard),
            "wide" => Ok(SizeVariant::Wide),
            "ultra-wide" => Ok(SizeVariant::UltraWide),
            "regular" => Ok(SizeVariant::Regular),
            _ => Err(format!("Invalid size variant: {}", s)),
        }
    }
}

/// Catalog categories for training equipment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    CompetitionEquipment,
    GripWristTraining,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCategory::CompetitionEquipment => write!(f, "competition-equipment"),
            ProductCategory::GripWristTraining => write!(f, "grip-wrist-training"),
        }
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "competition-equipment" => Ok(ProductCategory::CompetitionEquipment),
            "grip-wrist-training" => Ok(ProductCategory::GripWristTraining),
            _ => Err(format!("Invalid product category: {}", s)),
        }
    }
}

/// Lifecycle states for a checkout order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}
