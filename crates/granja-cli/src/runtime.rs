// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use granja_app::ScreenKind;
use granja_testkit::MockData;
use granja_tui::{InternalEvent, ScreenData};
use log::debug;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

pub struct MockRuntime {
    data: MockData,
    latency: Duration,
}

impl MockRuntime {
    pub fn new(seed: u64, latency: Duration) -> Self {
        Self {
            data: MockData::generate(seed),
            latency,
        }
    }
}

impl granja_tui::AppRuntime for MockRuntime {
    fn load_screen(&mut self, screen: ScreenKind) -> Result<ScreenData> {
        let data = match screen {
            ScreenKind::Profiles => ScreenData::Profiles(self.data.profiles.clone()),
            ScreenKind::Team => ScreenData::Team(self.data.team.clone()),
            ScreenKind::Suppliers => ScreenData::Suppliers(self.data.suppliers.clone()),
        };
        Ok(data)
    }

    fn spawn_load(
        &mut self,
        screen: ScreenKind,
        token: u64,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let data = self.load_screen(screen)?;
        let latency = self.latency;
        debug!("{} answers in {latency:?}", screen.label());
        thread::Builder::new()
            .name(format!("load-{}", screen.label()))
            .spawn(move || {
                thread::sleep(latency);
                let _ = tx.send(InternalEvent::Loaded {
                    screen,
                    token,
                    result: Ok(data),
                });
            })
            .context("spawn load thread")?;
        Ok(())
    }
}
