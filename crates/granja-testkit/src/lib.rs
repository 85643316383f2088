// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use granja_app::{
    FarmProfile, FarmProfileId, MemberRole, ProfileStatus, Supplier, SupplierCategory, SupplierId,
    TeamMember, TeamMemberId,
};
use time::macros::date;
use time::{Date, Duration};

pub const PROFILE_COUNT: usize = 37;
pub const TEAM_COUNT: usize = 143;
pub const SUPPLIER_COUNT: usize = 24;

const FARM_PREFIXES: [&str; 6] = ["Fazenda", "Sítio", "Chácara", "Granja", "Estância", "Rancho"];
const FARM_NAMES: [&str; 16] = [
    "Boa Vista",
    "Santa Clara",
    "Esperança",
    "Primavera",
    "Três Irmãos",
    "Água Limpa",
    "São José",
    "Bela Aurora",
    "Recanto Verde",
    "Pedra Branca",
    "Vale do Sol",
    "Palmeiras",
    "Ouro Verde",
    "Cachoeira",
    "Santa Fé",
    "Lagoa Seca",
];

const FIRST_NAMES: [&str; 16] = [
    "Ana", "Bruno", "Camila", "Davi", "Elisa", "Felipe", "Gabriela", "Heitor", "Isabela", "João",
    "Larissa", "Marcos", "Natália", "Otávio", "Paula", "Rafael",
];
const LAST_NAMES: [&str; 14] = [
    "Silva", "Souza", "Costa", "Oliveira", "Pereira", "Lima", "Carvalho", "Ribeiro", "Almeida",
    "Rocha", "Martins", "Barbosa", "Teixeira", "Moreira",
];

const CITIES: [(&str, &str); 12] = [
    ("Chapecó", "SC"),
    ("Xanxerê", "SC"),
    ("Concórdia", "SC"),
    ("Passo Fundo", "RS"),
    ("Erechim", "RS"),
    ("Lajeado", "RS"),
    ("Cascavel", "PR"),
    ("Toledo", "PR"),
    ("Rio Verde", "GO"),
    ("Sorriso", "MT"),
    ("Uberlândia", "MG"),
    ("Dourados", "MS"),
];

const SUPPLIER_ADJECTIVES: [&str; 10] = [
    "Agro", "Campo", "Terra", "Safra", "Rural", "Vale", "Planalto", "Sul", "Horizonte", "Celeiro",
];
const SUPPLIER_SUFFIXES: [&str; 5] = ["Ltda", "Comércio", "Distribuidora", "& Filhos", "S.A."];

const MAIL_DOMAINS: [&str; 4] = [
    "granja.example",
    "campo.example",
    "coop.example",
    "agro.example",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

#[derive(Debug, Clone)]
pub struct FarmFaker {
    rng: DeterministicRng,
}

impl FarmFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn farm_profile(&mut self, id: i64) -> FarmProfile {
        let (city, state) = CITIES[self.rng.int_n(CITIES.len())];
        let status = match self.rng.int_n(10) {
            0..=5 => ProfileStatus::Active,
            6..=8 => ProfileStatus::Pending,
            _ => ProfileStatus::Archived,
        };
        FarmProfile {
            id: FarmProfileId::new(id),
            name: self.farm_name(),
            owner: self.person_name(),
            city: city.to_owned(),
            state: state.to_owned(),
            hectares: (self.int_range(50, 25_000) as f64) / 10.0,
            status,
            registered_on: self.date_between(date!(2015 - 01 - 01), date!(2025 - 12 - 31)),
        }
    }

    pub fn team_member(&mut self, id: i64) -> TeamMember {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&MAIL_DOMAINS);
        TeamMember {
            id: TeamMemberId::new(id),
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}{id}@{domain}",
                first.to_lowercase(),
                last.to_lowercase()
            ),
            role: MemberRole::ALL[self.rng.int_n(MemberRole::ALL.len())],
            farm: self.farm_name(),
            joined_on: self.date_between(date!(2018 - 01 - 01), date!(2026 - 06 - 30)),
            active: self.rng.int_n(5) != 0,
        }
    }

    pub fn supplier(&mut self, id: i64) -> Supplier {
        let category = SupplierCategory::ALL[self.rng.int_n(SupplierCategory::ALL.len())];
        let (city, _) = CITIES[self.rng.int_n(CITIES.len())];
        let last_order = if self.rng.int_n(6) == 0 {
            None
        } else {
            Some(self.date_between(date!(2024 - 01 - 01), date!(2026 - 09 - 30)))
        };
        let open_balance_cents = if self.rng.int_n(3) == 0 {
            0
        } else {
            self.int_range(5_000, 9_500_000)
        };
        Supplier {
            id: SupplierId::new(id),
            name: self.supplier_name(category),
            contact_name: self.person_name(),
            phone: format!(
                "({:02}) {:04}-{:04}",
                self.int_range(11, 99),
                self.int_range(2_000, 9_999),
                self.int_range(0, 9_999),
            ),
            category,
            city: city.to_owned(),
            open_balance_cents,
            last_order,
        }
    }

    fn farm_name(&mut self) -> String {
        format!(
            "{} {}",
            self.pick(&FARM_PREFIXES),
            self.pick(&FARM_NAMES)
        )
    }

    fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    fn supplier_name(&mut self, category: SupplierCategory) -> String {
        let trade = match category {
            SupplierCategory::Seed => "Sementes",
            SupplierCategory::Fertilizer => "Fertilizantes",
            SupplierCategory::Machinery => "Máquinas",
            SupplierCategory::Feed => "Rações",
            SupplierCategory::Services => "Serviços",
        };
        format!(
            "{} {trade} {}",
            self.pick(&SUPPLIER_ADJECTIVES),
            self.pick(&SUPPLIER_SUFFIXES)
        )
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn date_between(&mut self, start: Date, end: Date) -> Date {
        let days = (end - start).whole_days();
        if days <= 0 {
            return start;
        }
        start + Duration::days(self.int_range(0, days))
    }
}

/// The three mock collections behind the screens. The same seed always
/// produces the same records.
#[derive(Debug, Clone, PartialEq)]
pub struct MockData {
    pub profiles: Vec<FarmProfile>,
    pub team: Vec<TeamMember>,
    pub suppliers: Vec<Supplier>,
}

impl MockData {
    pub fn generate(seed: u64) -> Self {
        let mut faker = FarmFaker::new(seed);
        let profiles = (1..=PROFILE_COUNT as i64)
            .map(|id| faker.farm_profile(id))
            .collect();
        let team = (1..=TEAM_COUNT as i64)
            .map(|id| faker.team_member(id))
            .collect();
        let suppliers = (1..=SUPPLIER_COUNT as i64)
            .map(|id| faker.supplier(id))
            .collect();
        Self {
            profiles,
            team,
            suppliers,
        }
    }
}
