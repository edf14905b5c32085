use std::{
    collections::HashMap,
    sync::{Mutex, OnceLock},
};

static METRICS: OnceLock<Mutex<MetricsState>> = OnceLock::new();

struct MetricsState {
    total: u64,
    errors: u64,
    per_endpoint: HashMap<&'static str, u64>,
    per_endpoint_err: HashMap<&'static str, u64>,
    // 请求时延统计（毫秒）
    latency_sum_ms: u128,
    // 简易直方图分桶（毫秒）：<5, <25, <100, <500, >=500
    latency_hist_buckets: [u64; 5],
}

const LATENCY_BOUNDS_MS: [u128; 4] = [5, 25, 100, 500];

fn state() -> &'static Mutex<MetricsState> {
    METRICS.get_or_init(|| {
        Mutex::new(MetricsState {
            total: 0,
            errors: 0,
            per_endpoint: HashMap::new(),
            per_endpoint_err: HashMap::new(),
            latency_sum_ms: 0,
            latency_hist_buckets: [0; 5],
        })
    })
}

fn lock() -> std::sync::MutexGuard<'static, MetricsState> {
    match state().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(), // 避免因锁污染导致 panic
    }
}

pub fn count_ok(endpoint: &'static str) {
    let mut s = lock();
    s.total += 1;
    *s.per_endpoint.entry(endpoint).or_insert(0) += 1;
}

pub fn count_err(endpoint: &'static str) {
    let mut s = lock();
    s.total += 1;
    s.errors += 1;
    *s.per_endpoint.entry(endpoint).or_insert(0) += 1;
    *s.per_endpoint_err.entry(endpoint).or_insert(0) += 1;
}

/// 按处理结果计数
pub fn observe<T, E>(endpoint: &'static str, result: &Result<T, E>) {
    if result.is_ok() {
        count_ok(endpoint);
    } else {
        count_err(endpoint);
    }
}

pub fn observe_latency_ms(latency_ms: u128) {
    let mut s = lock();
    s.latency_sum_ms += latency_ms;
    let b = LATENCY_BOUNDS_MS
        .iter()
        .position(|bound| latency_ms < *bound)
        .unwrap_or(LATENCY_BOUNDS_MS.len());
    s.latency_hist_buckets[b] += 1;
}

/// Prometheus 文本格式；`wallets` 为当前钱包数量
pub fn render_prometheus(wallets: usize) -> String {
    let s = lock();
    let mut out = String::new();
    out.push_str("# HELP coinfolio_requests_total Total requests\n");
    out.push_str("# TYPE coinfolio_requests_total counter\n");
    out.push_str(&format!("coinfolio_requests_total {}\n", s.total));

    out.push_str("# HELP coinfolio_errors_total Total error responses\n");
    out.push_str("# TYPE coinfolio_errors_total counter\n");
    out.push_str(&format!("coinfolio_errors_total {}\n", s.errors));

    out.push_str("# HELP coinfolio_endpoint_requests_total Requests per endpoint\n");
    out.push_str("# TYPE coinfolio_endpoint_requests_total counter\n");
    for (k, v) in s.per_endpoint.iter() {
        out.push_str(&format!(
            "coinfolio_endpoint_requests_total{{endpoint=\"{}\"}} {}\n",
            k, v
        ));
    }

    out.push_str("# HELP coinfolio_endpoint_errors_total Errors per endpoint\n");
    out.push_str("# TYPE coinfolio_endpoint_errors_total counter\n");
    for (k, v) in s.per_endpoint_err.iter() {
        out.push_str(&format!(
            "coinfolio_endpoint_errors_total{{endpoint=\"{}\"}} {}\n",
            k, v
        ));
    }

    out.push_str("# HELP coinfolio_request_latency_ms_sum Sum of request latency in ms\n");
    out.push_str("# TYPE coinfolio_request_latency_ms_sum counter\n");
    out.push_str(&format!(
        "coinfolio_request_latency_ms_sum {}\n",
        s.latency_sum_ms
    ));

    out.push_str("# HELP coinfolio_request_latency_ms_bucket Request latency histogram buckets\n");
    out.push_str("# TYPE coinfolio_request_latency_ms_bucket histogram\n");
    let mut cumulative = 0;
    for (i, bound) in LATENCY_BOUNDS_MS.iter().enumerate() {
        cumulative += s.latency_hist_buckets[i];
        out.push_str(&format!(
            "coinfolio_request_latency_ms_bucket{{le=\"{}\"}} {}\n",
            bound, cumulative
        ));
    }
    // +Inf 桶
    out.push_str(&format!(
        "coinfolio_request_latency_ms_bucket{{le=\"+Inf\"}} {}\n",
        s.latency_hist_buckets.iter().sum::<u64>()
    ));

    out.push_str("# HELP coinfolio_wallets Wallets currently in the store\n");
    out.push_str("# TYPE coinfolio_wallets gauge\n");
    out.push_str(&format!("coinfolio_wallets {}\n", wallets));

    out
}
