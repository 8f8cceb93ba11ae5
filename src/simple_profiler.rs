//! Simple profiling guards using thread-local storage
//!
//! Lightweight timing without changing function signatures.
//! Enable with environment variable: AI_SNAKE_PROFILE=1

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

thread_local! {
    static PATH_SEARCH_TIME: RefCell<u64> = RefCell::new(0);
    static PATH_SEARCH_COUNT: RefCell<usize> = RefCell::new(0);

    static SAFETY_EVAL_TIME: RefCell<u64> = RefCell::new(0);
    static SAFETY_EVAL_COUNT: RefCell<usize> = RefCell::new(0);

    static HORIZON_SIM_TIME: RefCell<u64> = RefCell::new(0);
    static HORIZON_SIM_COUNT: RefCell<usize> = RefCell::new(0);

    static DECIDE_TIME: RefCell<u64> = RefCell::new(0);
    static DECIDE_COUNT: RefCell<usize> = RefCell::new(0);
}

// Global aggregators
static GLOBAL_PATH_SEARCH_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_PATH_SEARCH_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_SAFETY_EVAL_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_SAFETY_EVAL_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_HORIZON_SIM_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_HORIZON_SIM_COUNT: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_DECIDE_TIME: AtomicU64 = AtomicU64::new(0);
static GLOBAL_DECIDE_COUNT: AtomicUsize = AtomicUsize::new(0);

#[inline]
pub fn is_profiling_enabled() -> bool {
    std::env::var("AI_SNAKE_PROFILE").is_ok()
}

pub struct ProfileGuard {
    start: Instant,
    category: &'static str,
}

impl ProfileGuard {
    pub fn new(category: &'static str) -> Option<Self> {
        if is_profiling_enabled() {
            Some(ProfileGuard {
                start: Instant::now(),
                category,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;

        match self.category {
            "path_search" => {
                PATH_SEARCH_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                PATH_SEARCH_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "safety_eval" => {
                SAFETY_EVAL_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                SAFETY_EVAL_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "horizon_sim" => {
                HORIZON_SIM_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                HORIZON_SIM_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "decide" => {
                DECIDE_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                DECIDE_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            _ => {}
        }
    }
}

pub fn merge_thread_local() {
    if !is_profiling_enabled() {
        return;
    }

    PATH_SEARCH_TIME.with(|t| {
        GLOBAL_PATH_SEARCH_TIME.fetch_add(*t.borrow(), Ordering::Relaxed);
        *t.borrow_mut() = 0;
    });
    PATH_SEARCH_COUNT.with(|c| {
        GLOBAL_PATH_SEARCH_COUNT.fetch_add(*c.borrow(), Ordering::Relaxed);
        *c.borrow_mut() = 0;
    });

    SAFETY_EVAL_TIME.with(|t| {
        GLOBAL_SAFETY_EVAL_TIME.fetch_add(*t.borrow(), Ordering::Relaxed);
        *t.borrow_mut() = 0;
    });
    SAFETY_EVAL_COUNT.with(|c| {
        GLOBAL_SAFETY_EVAL_COUNT.fetch_add(*c.borrow(), Ordering::Relaxed);
        *c.borrow_mut() = 0;
    });

    HORIZON_SIM_TIME.with(|t| {
        GLOBAL_HORIZON_SIM_TIME.fetch_add(*t.borrow(), Ordering::Relaxed);
        *t.borrow_mut() = 0;
    });
    HORIZON_SIM_COUNT.with(|c| {
        GLOBAL_HORIZON_SIM_COUNT.fetch_add(*c.borrow(), Ordering::Relaxed);
        *c.borrow_mut() = 0;
    });

    DECIDE_TIME.with(|t| {
        GLOBAL_DECIDE_TIME.fetch_add(*t.borrow(), Ordering::Relaxed);
        *t.borrow_mut() = 0;
    });
    DECIDE_COUNT.with(|c| {
        GLOBAL_DECIDE_COUNT.fetch_add(*c.borrow(), Ordering::Relaxed);
        *c.borrow_mut() = 0;
    });
}

pub fn print_report(total_time_ms: u64) {
    if !is_profiling_enabled() {
        return;
    }

    let total_ns = total_time_ms * 1_000_000;

    eprintln!("\n═══════════════════════════════════════════════════════════");
    eprintln!("                 PERFORMANCE PROFILE");
    eprintln!("═══════════════════════════════════════════════════════════");
    eprintln!("Total Time: {}ms\n", total_time_ms);

    let rows = [
        (
            "Decide",
            GLOBAL_DECIDE_TIME.load(Ordering::Relaxed),
            GLOBAL_DECIDE_COUNT.load(Ordering::Relaxed),
        ),
        (
            "Safety Evaluation",
            GLOBAL_SAFETY_EVAL_TIME.load(Ordering::Relaxed),
            GLOBAL_SAFETY_EVAL_COUNT.load(Ordering::Relaxed),
        ),
        (
            "Horizon Simulation",
            GLOBAL_HORIZON_SIM_TIME.load(Ordering::Relaxed),
            GLOBAL_HORIZON_SIM_COUNT.load(Ordering::Relaxed),
        ),
        (
            "Path Search",
            GLOBAL_PATH_SEARCH_TIME.load(Ordering::Relaxed),
            GLOBAL_PATH_SEARCH_COUNT.load(Ordering::Relaxed),
        ),
    ];

    for (name, time_ns, count) in rows.iter() {
        let ms = *time_ns as f64 / 1_000_000.0;
        let pct = if total_ns > 0 {
            100.0 * *time_ns as f64 / total_ns as f64
        } else {
            0.0
        };
        let avg_us = if *count > 0 {
            *time_ns as f64 / (*count as f64 * 1000.0)
        } else {
            0.0
        };

        eprintln!("{}:", name);
        eprintln!("  Time:     {:.2}ms ({:.1}%)", ms, pct);
        eprintln!("  Calls:    {}", count);
        eprintln!("  Avg:      {:.2}µs/call\n", avg_us);
    }

    eprintln!("═══════════════════════════════════════════════════════════\n");
}

pub fn reset() {
    GLOBAL_PATH_SEARCH_TIME.store(0, Ordering::Relaxed);
    GLOBAL_PATH_SEARCH_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_SAFETY_EVAL_TIME.store(0, Ordering::Relaxed);
    GLOBAL_SAFETY_EVAL_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_HORIZON_SIM_TIME.store(0, Ordering::Relaxed);
    GLOBAL_HORIZON_SIM_COUNT.store(0, Ordering::Relaxed);
    GLOBAL_DECIDE_TIME.store(0, Ordering::Relaxed);
    GLOBAL_DECIDE_COUNT.store(0, Ordering::Relaxed);
}

#[macro_export]
macro_rules! profile {
    ($category:expr, $code:block) => {{
        let _guard = $crate::simple_profiler::ProfileGuard::new($category);
        $code
    }};
}
