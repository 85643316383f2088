// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use granja_table::{Column, Content, Record};
use std::fmt;

use crate::{
    FarmProfile, FarmProfileId, ProfileStatus, ScreenKind, Supplier, SupplierCategory, SupplierId,
    TeamMember, TeamMemberId, format_hectares, format_money,
};

pub struct ChipRule<R> {
    pub label: &'static str,
    pub keep: fn(&R) -> bool,
}

impl<R> fmt::Debug for ChipRule<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChipRule")
            .field("label", &self.label)
            .finish()
    }
}

fn keep_all<R>(_: &R) -> bool {
    true
}

pub trait Listing: Record + Clone + 'static {
    type Id: Ord + Clone + fmt::Debug + fmt::Display + 'static;

    const SCREEN: ScreenKind;
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;
    const NOUN: &'static str;

    fn id(&self) -> Self::Id;
    fn name(&self) -> &str;
    fn haystack(&self) -> String;
    fn columns() -> Vec<Column<Self>>;
    fn chips() -> Vec<ChipRule<Self>>;

    fn row_class(&self) -> Option<&'static str> {
        None
    }

    /// Case-insensitive substring match; a blank needle matches everything.
    fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty() || self.haystack().to_lowercase().contains(&needle)
    }
}

impl Listing for FarmProfile {
    type Id = FarmProfileId;

    const SCREEN: ScreenKind = ScreenKind::Profiles;
    const TITLE: &'static str = "Farm profiles";
    const DESCRIPTION: &'static str = "Registered properties and their owners";
    const NOUN: &'static str = "profile";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn haystack(&self) -> String {
        format!("{} {} {} {}", self.name, self.owner, self.city, self.state)
    }

    fn row_class(&self) -> Option<&'static str> {
        (self.status == ProfileStatus::Archived).then_some("muted")
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("owner", "Owner").sortable(),
            Column::new("location", "Location"),
            Column::new("hectares", "Area")
                .sortable()
                .header_class_name("numeric")
                .render(|_, profile: &FarmProfile, _| {
                    Content::text(format_hectares(profile.hectares)).with_class("numeric")
                }),
            Column::new("status", "Status")
                .sortable()
                .render(|_, profile: &FarmProfile, _| {
                    let status = profile.status.as_str();
                    Content::text(status).with_class(format!("status-{status}"))
                }),
            Column::new("registered_on", "Registered").sortable(),
        ]
    }

    fn chips() -> Vec<ChipRule<Self>> {
        vec![
            ChipRule {
                label: "all",
                keep: keep_all,
            },
            ChipRule {
                label: "active",
                keep: |profile: &FarmProfile| profile.status == ProfileStatus::Active,
            },
            ChipRule {
                label: "pending",
                keep: |profile: &FarmProfile| profile.status == ProfileStatus::Pending,
            },
            ChipRule {
                label: "archived",
                keep: |profile: &FarmProfile| profile.status == ProfileStatus::Archived,
            },
        ]
    }
}

impl Listing for TeamMember {
    type Id = TeamMemberId;

    const SCREEN: ScreenKind = ScreenKind::Team;
    const TITLE: &'static str = "Team";
    const DESCRIPTION: &'static str = "People working across the farms";
    const NOUN: &'static str = "member";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.email,
            self.role.as_str(),
            self.farm
        )
    }

    fn row_class(&self) -> Option<&'static str> {
        (!self.active).then_some("muted")
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("email", "Email").class_name("muted"),
            Column::new("role", "Role").sortable(),
            Column::new("farm", "Farm").sortable(),
            Column::new("joined_on", "Joined").sortable(),
            Column::new("active", "Active").render(|value, _: &TeamMember, _| match value {
                Some(granja_table::CellValue::Bool(true)) => Content::text("yes"),
                _ => Content::text("no").with_class("muted"),
            }),
        ]
    }

    fn chips() -> Vec<ChipRule<Self>> {
        vec![
            ChipRule {
                label: "all",
                keep: keep_all,
            },
            ChipRule {
                label: "active",
                keep: |member: &TeamMember| member.active,
            },
            ChipRule {
                label: "inactive",
                keep: |member: &TeamMember| !member.active,
            },
        ]
    }
}

impl Listing for Supplier {
    type Id = SupplierId;

    const SCREEN: ScreenKind = ScreenKind::Suppliers;
    const TITLE: &'static str = "Suppliers";
    const DESCRIPTION: &'static str = "Vendors of inputs, machinery and services";
    const NOUN: &'static str = "supplier";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.contact_name,
            self.category.as_str(),
            self.city
        )
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("contact", "Contact"),
            Column::new("category", "Category").sortable(),
            Column::new("city", "City").sortable(),
            Column::new("balance", "Balance")
                .sortable()
                .header_class_name("numeric")
                .render(|_, supplier: &Supplier, _| {
                    let class = if supplier.open_balance_cents > 0 {
                        "owed"
                    } else {
                        "numeric"
                    };
                    Content::text(format_money(supplier.open_balance_cents)).with_class(class)
                }),
            Column::new("last_order", "Last order")
                .sortable()
                .render(|value, _: &Supplier, _| match value {
                    Some(value) => Content::text(value.display()),
                    None => Content::text("never").with_class("muted"),
                }),
        ]
    }

    fn chips() -> Vec<ChipRule<Self>> {
        let mut chips = vec![ChipRule {
            label: "all",
            keep: keep_all,
        }];
        chips.extend([
            ChipRule {
                label: SupplierCategory::Seed.as_str(),
                keep: |supplier: &Supplier| supplier.category == SupplierCategory::Seed,
            },
            ChipRule {
                label: SupplierCategory::Fertilizer.as_str(),
                keep: |supplier: &Supplier| supplier.category == SupplierCategory::Fertilizer,
            },
            ChipRule {
                label: SupplierCategory::Machinery.as_str(),
                keep: |supplier: &Supplier| supplier.category == SupplierCategory::Machinery,
            },
            ChipRule {
                label: SupplierCategory::Feed.as_str(),
                keep: |supplier: &Supplier| supplier.category == SupplierCategory::Feed,
            },
            ChipRule {
                label: SupplierCategory::Services.as_str(),
                keep: |supplier: &Supplier| supplier.category == SupplierCategory::Services,
            },
        ]);
        chips
    }
}

#[cfg(test)]
mod tests {
    use super::Listing;
    use crate::{MemberRole, Supplier, SupplierCategory, SupplierId, TeamMember, TeamMemberId};
    use time::{Date, Month};

    fn supplier(balance: i64, last_order: Option<Date>) -> Supplier {
        Supplier {
            id: SupplierId::new(3),
            name: "Agro Vale Sementes".to_owned(),
            contact_name: "Rui Lima".to_owned(),
            phone: "(49) 3322-1100".to_owned(),
            category: SupplierCategory::Seed,
            city: "Xanxerê".to_owned(),
            open_balance_cents: balance,
            last_order,
        }
    }

    #[test]
    fn search_is_case_insensitive_and_blank_matches_all() {
        let supplier = supplier(0, None);
        assert!(supplier.matches("VALE"));
        assert!(supplier.matches("rui"));
        assert!(supplier.matches("  "));
        assert!(!supplier.matches("tractor"));
    }

    #[test]
    fn supplier_columns_render_money_and_missing_dates() -> anyhow::Result<()> {
        let columns = Supplier::columns();
        let owed = supplier(
            250_075,
            Some(Date::from_calendar_date(2025, Month::August, 14)?),
        );
        let never = supplier(0, None);

        let balance = columns
            .iter()
            .find(|column| column.key == "balance")
            .ok_or_else(|| anyhow::anyhow!("balance column"))?;
        let cell = balance.cell(&owed, 0);
        assert_eq!(cell.text, "$2,500.75");
        assert_eq!(cell.class.as_deref(), Some("owed"));

        let last_order = columns
            .iter()
            .find(|column| column.key == "last_order")
            .ok_or_else(|| anyhow::anyhow!("last order column"))?;
        assert_eq!(last_order.cell(&owed, 0).text, "2025-08-14");
        assert_eq!(last_order.cell(&never, 1).text, "never");
        Ok(())
    }

    #[test]
    fn chips_start_with_all_and_partition_members() -> anyhow::Result<()> {
        let member = TeamMember {
            id: TeamMemberId::new(1),
            name: "Davi Souza".to_owned(),
            email: "davi@granja.example".to_owned(),
            role: MemberRole::Operator,
            farm: "Fazenda Esperança".to_owned(),
            joined_on: Date::from_calendar_date(2023, Month::March, 10)?,
            active: false,
        };
        let chips = TeamMember::chips();
        assert_eq!(chips[0].label, "all");
        let kept: Vec<&str> = chips
            .iter()
            .filter(|chip| (chip.keep)(&member))
            .map(|chip| chip.label)
            .collect();
        assert_eq!(kept, vec!["all", "inactive"]);
        Ok(())
    }
}
