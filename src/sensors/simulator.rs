// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Tank simulator for demo/testing

use anyhow::{anyhow, Result};
use rand::prelude::*;
use rand_distr::Bernoulli;

use super::{Reading, ReadingSource, WaterQuality};
use crate::config::SimulatorConfig;

const LEVEL_MIN: f64 = 10.0;
const LEVEL_SPAN: f64 = 90.0;
const FLOW_MIN: f64 = 0.4;
const FLOW_SPAN: f64 = 2.6;
const PH_MIN: f64 = 6.5;
const PH_SPAN: f64 = 1.5;

/// Generates synthetic tank readings from independent uniform draws
pub struct TankSimulator {
    id: String,
    rng: StdRng,
    zero_flow: Bernoulli,
    extended: bool,
    potable_threshold_rank: u8,
}

impl TankSimulator {
    pub fn new(id: &str, config: &SimulatorConfig, potable_threshold_rank: u8) -> Result<Self> {
        let zero_flow = Bernoulli::new(config.zero_flow_probability)
            .map_err(|e| anyhow!("invalid zero flow probability {}: {}", config.zero_flow_probability, e))?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            id: id.to_string(),
            rng,
            zero_flow,
            extended: config.extended,
            potable_threshold_rank,
        })
    }

    fn sample_level(&mut self) -> u8 {
        (LEVEL_MIN + self.rng.gen::<f64>() * LEVEL_SPAN).round() as u8
    }

    fn sample_flow(&mut self) -> f64 {
        if self.zero_flow.sample(&mut self.rng) {
            return 0.0;
        }
        round_to(FLOW_MIN + self.rng.gen::<f64>() * FLOW_SPAN, 2)
    }

    fn sample_ph(&mut self) -> f64 {
        round_to(PH_MIN + self.rng.gen::<f64>() * PH_SPAN, 1)
    }

    fn sample_quality(&mut self) -> WaterQuality {
        WaterQuality::ALL[self.rng.gen_range(0..WaterQuality::ALL.len())]
    }
}

impl ReadingSource for TankSimulator {
    fn id(&self) -> &str {
        &self.id
    }

    fn generate(&mut self) -> Result<Reading> {
        let level = self.sample_level();
        let flow = self.sample_flow();
        let reading = Reading::new(level, flow);

        if !self.extended {
            return Ok(reading);
        }

        let ph = self.sample_ph();
        let quality = self.sample_quality();
        Ok(reading.with_quality(ph, quality, self.potable_threshold_rank))
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
