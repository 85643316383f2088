// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use granja_table::{CellValue, Record};
use time::Date;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStatus {
    Active,
    Pending,
    Archived,
}

impl ProfileStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Pending, Self::Archived];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    Owner,
    Manager,
    Agronomist,
    Operator,
    Seasonal,
}

impl MemberRole {
    pub const ALL: [Self; 5] = [
        Self::Owner,
        Self::Manager,
        Self::Agronomist,
        Self::Operator,
        Self::Seasonal,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Agronomist => "agronomist",
            Self::Operator => "operator",
            Self::Seasonal => "seasonal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "owner" => Some(Self::Owner),
            "manager" => Some(Self::Manager),
            "agronomist" => Some(Self::Agronomist),
            "operator" => Some(Self::Operator),
            "seasonal" => Some(Self::Seasonal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierCategory {
    Seed,
    Fertilizer,
    Machinery,
    Feed,
    Services,
}

impl SupplierCategory {
    pub const ALL: [Self; 5] = [
        Self::Seed,
        Self::Fertilizer,
        Self::Machinery,
        Self::Feed,
        Self::Services,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Fertilizer => "fertilizer",
            Self::Machinery => "machinery",
            Self::Feed => "feed",
            Self::Services => "services",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "seed" => Some(Self::Seed),
            "fertilizer" => Some(Self::Fertilizer),
            "machinery" => Some(Self::Machinery),
            "feed" => Some(Self::Feed),
            "services" => Some(Self::Services),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Profiles,
    Team,
    Suppliers,
}

impl ScreenKind {
    pub const ALL: [Self; 3] = [Self::Profiles, Self::Team, Self::Suppliers];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::Team => "team",
            Self::Suppliers => "suppliers",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "profiles" => Some(Self::Profiles),
            "team" => Some(Self::Team),
            "suppliers" => Some(Self::Suppliers),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Search,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FarmProfile {
    pub id: FarmProfileId,
    pub name: String,
    pub owner: String,
    pub city: String,
    pub state: String,
    pub hectares: f64,
    pub status: ProfileStatus,
    pub registered_on: Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub farm: String,
    pub joined_on: Date,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact_name: String,
    pub phone: String,
    pub category: SupplierCategory,
    pub city: String,
    pub open_balance_cents: i64,
    pub last_order: Option<Date>,
}

impl Record for FarmProfile {
    fn field(&self, key: &str) -> Option<CellValue> {
        match key {
            "id" => Some(CellValue::Integer(self.id.get())),
            "name" => Some(self.name.as_str().into()),
            "owner" => Some(self.owner.as_str().into()),
            "location" => Some(format!("{}, {}", self.city, self.state).into()),
            "hectares" => Some(CellValue::Decimal(self.hectares)),
            "status" => Some(self.status.as_str().into()),
            "registered_on" => Some(CellValue::Date(self.registered_on)),
            _ => None,
        }
    }
}

impl Record for TeamMember {
    fn field(&self, key: &str) -> Option<CellValue> {
        match key {
            "id" => Some(CellValue::Integer(self.id.get())),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "role" => Some(self.role.as_str().into()),
            "farm" => Some(self.farm.as_str().into()),
            "joined_on" => Some(CellValue::Date(self.joined_on)),
            "active" => Some(CellValue::Bool(self.active)),
            _ => None,
        }
    }
}

impl Record for Supplier {
    fn field(&self, key: &str) -> Option<CellValue> {
        match key {
            "id" => Some(CellValue::Integer(self.id.get())),
            "name" => Some(self.name.as_str().into()),
            "contact" => Some(self.contact_name.as_str().into()),
            "phone" => Some(self.phone.as_str().into()),
            "category" => Some(self.category.as_str().into()),
            "city" => Some(self.city.as_str().into()),
            "balance" => Some(CellValue::Money(self.open_balance_cents)),
            "last_order" => self.last_order.map(CellValue::Date),
            _ => None,
        }
    }
}

pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let absolute = cents.unsigned_abs();
    let whole = absolute / 100;
    let cents_component = absolute % 100;
    format!("{sign}${}.{cents_component:02}", group_thousands(whole))
}

pub fn format_hectares(hectares: f64) -> String {
    format!("{hectares:.1} ha")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
