// Terminal-facing pieces: loading feedback and report rendering.

pub mod chart;
pub mod loading;
pub mod markdown;
pub mod report;
