//! Shared test harness modules for the poirec CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::rank::{
    RankConfig, Strategy, config_from_layers_for_test, execute_rank, run_rank_with,
};

mod helpers;
mod unit;
