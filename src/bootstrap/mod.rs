//! Canary application bootstrapping.
//!
//! This module includes all the functions to build the application, its
//! dependencies, and run the jobs.
//!
//! Jobs are tasks executed concurrently: the HTTP tracker and the peer
//! listener each run as an independent job.
pub mod app;
pub mod jobs;
pub mod logging;
