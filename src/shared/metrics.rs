//! Prometheus Metrics Module
//!
//! 订单管理器的运行指标
//!
//! ## 指标类型
//! - **Counter**: 新增订单数（按方向）、取消数、重复拒绝、CSV坏行、快照重建
//! - **Gauge**: 当前活跃订单数
//!
//! Metrics are recorded by the application service, never by the domain
//! layer, so `RecordStore` stays free of global state.
//!
//! ## 使用示例
//! ```rust,ignore
//! use limit_order_manager::shared::metrics::METRICS;
//!
//! METRICS.records_added.with_label_values(&["buy"]).inc();
//! println!("{}", METRICS.export());
//! ```

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, Encoder, IntCounter,
    IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    /// 全局Metrics实例
    pub static ref METRICS: Metrics = Metrics::new();
}

pub struct Metrics {
    /// 成功新增的订单数 (按方向: buy/sell)
    pub records_added: IntCounterVec,

    /// 成功取消的订单数
    pub records_cancelled: IntCounter,

    /// 因ID重复被拒绝的新增
    pub duplicate_rejections: IntCounter,

    /// 目标ID不存在的取消
    pub cancel_misses: IntCounter,

    /// CSV中被丢弃的格式错误行
    pub malformed_lines: IntCounter,

    /// 快照缓存重建次数
    pub snapshot_rebuilds: IntCounter,

    /// 当前活跃订单数
    pub active_records: IntGauge,
}

impl Metrics {
    // 注册到默认registry，只能创建一次（由lazy_static保证）
    fn new() -> Self {
        Self {
            records_added: register_int_counter_vec!(
                "order_manager_records_added_total",
                "Total number of records accepted by the store",
                &["side"]
            )
            .expect("metric can be registered"),

            records_cancelled: register_int_counter!(
                "order_manager_records_cancelled_total",
                "Total number of records cancelled"
            )
            .expect("metric can be registered"),

            duplicate_rejections: register_int_counter!(
                "order_manager_duplicate_rejections_total",
                "Total number of adds rejected because the id was already live"
            )
            .expect("metric can be registered"),

            cancel_misses: register_int_counter!(
                "order_manager_cancel_misses_total",
                "Total number of cancels for ids that were not live"
            )
            .expect("metric can be registered"),

            malformed_lines: register_int_counter!(
                "order_manager_csv_malformed_lines_total",
                "Total number of CSV lines dropped as malformed"
            )
            .expect("metric can be registered"),

            snapshot_rebuilds: register_int_counter!(
                "order_manager_snapshot_rebuilds_total",
                "Total number of snapshot cache rebuilds"
            )
            .expect("metric can be registered"),

            active_records: register_int_gauge!(
                "order_manager_active_records",
                "Number of live records in the store"
            )
            .expect("metric can be registered"),
        }
    }

    /// 导出Prometheus文本格式的指标
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = prometheus::gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::warn!("metrics encoding failed: {}", e);
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_export() {
        // 全局共享实例，只断言指标名存在
        METRICS.records_added.with_label_values(&["buy"]).inc();
        METRICS.records_cancelled.inc();

        let output = METRICS.export();
        assert!(output.contains("order_manager_records_added_total"));
        assert!(output.contains("order_manager_records_cancelled_total"));
    }

    #[test]
    fn test_gauge_export() {
        METRICS.active_records.set(3);

        let output = METRICS.export();
        assert!(output.contains("order_manager_active_records"));
    }
}
