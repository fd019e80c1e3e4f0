//! Headline counters and the analytics panel figures

use serde::Serialize;

use crate::domain::{DispatchStatus, InvoiceStatus, QcStatus, QuotationStatus};
use crate::state::AppState;

/// Counters shown on the KPI strip above every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub pending_approvals: usize,
    pub qc_failures: usize,
    pub open_invoices: usize,
    pub dispatch_in_flight: usize,
}

impl Kpis {
    pub fn compute(state: &AppState) -> Self {
        Self {
            pending_approvals: state
                .quotations
                .iter()
                .filter(|q| q.status == QuotationStatus::Pending)
                .count(),
            qc_failures: state
                .qc_reports
                .iter()
                .filter(|q| q.status == QcStatus::Failed)
                .count(),
            open_invoices: state
                .invoices
                .iter()
                .filter(|i| i.status == InvoiceStatus::Open)
                .count(),
            dispatch_in_flight: state
                .dispatch_orders
                .iter()
                .filter(|d| d.status != DispatchStatus::Delivered)
                .count(),
        }
    }

    pub fn cards(&self) -> [(&'static str, usize); 4] {
        [
            ("Pending Approvals", self.pending_approvals),
            ("QC Failures", self.qc_failures),
            ("Open Invoices", self.open_invoices),
            ("Dispatch In-Flight", self.dispatch_in_flight),
        ]
    }
}

/// One labelled 0-100 bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub label: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analytics {
    pub sales_billed: f64,
    pub collections: f64,
    /// Output over input across job cards, as a rounded percentage
    pub yield_percent: i64,
    pub bars: [Bar; 4],
}

impl Analytics {
    pub fn compute(state: &AppState) -> Self {
        let sales_billed = state.invoices.iter().map(|i| i.amount).sum();
        let collections = state.payments.iter().map(|p| p.amount).sum();

        let yield_percent = if state.job_cards.is_empty() {
            0
        } else {
            let output: f64 = state.job_cards.iter().map(|j| j.output_qty).sum();
            let input: f64 = state.job_cards.iter().map(|j| j.input_qty).sum();
            (output / input.max(1.0) * 100.0).round() as i64
        };

        let bars = [
            Bar {
                label: "Sales Pipeline",
                value: scaled(state.enquiries.len(), 12),
            },
            Bar {
                label: "Production Throughput",
                value: scaled(state.job_cards.len(), 15),
            },
            Bar {
                label: "Quality Health",
                value: 100u32.saturating_sub(capped(state.ncr.len()).saturating_mul(8)),
            },
            Bar {
                label: "Dispatch Efficiency",
                value: scaled(state.dispatch_orders.len(), 10),
            },
        ];

        Self {
            sales_billed,
            collections,
            yield_percent,
            bars,
        }
    }
}

fn capped(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn scaled(count: usize, step: u32) -> u32 {
    capped(count).saturating_mul(step).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::*;

    fn job(input: f64, output: f64) -> JobCard {
        JobCard {
            id: format!("JOB-{}", input),
            batch: "B1".to_string(),
            machine: "Mill".to_string(),
            input_qty: input,
            output_qty: output,
            sales_order_id: None,
            status: StageStatus::Completed,
        }
    }

    #[test]
    fn test_empty_state() {
        let analytics = Analytics::compute(&AppState::default());
        assert_eq!(analytics.yield_percent, 0);
        assert_eq!(analytics.sales_billed, 0.0);
        let values: Vec<u32> = analytics.bars.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![0, 0, 100, 0]);
        assert_eq!(Kpis::compute(&AppState::default()).pending_approvals, 0);
    }

    #[test]
    fn test_yield_and_bar_limits() {
        let mut state = AppState::default();
        state.job_cards = vec![job(100.0, 80.0), job(50.0, 40.0)];
        for i in 0..9 {
            state.enquiries.push(Enquiry {
                id: format!("ENQ-{}", i),
                customer: "C".to_string(),
                product: "P".to_string(),
                qty: 1.0,
                delivery_date: "2026-01-01".to_string(),
                ai_score: 70,
                status: EnquiryStatus::Open,
            });
        }
        for i in 0..13 {
            state.ncr.push(Ncr {
                id: format!("NCR-{}", i),
                qc_id: "QC-1".to_string(),
                root_cause: "Parameter out of range".to_string(),
                status: NcrStatus::Open,
            });
        }

        let analytics = Analytics::compute(&state);
        assert_eq!(analytics.yield_percent, 80);
        assert_eq!(analytics.bars[0].value, 100);
        assert_eq!(analytics.bars[1].value, 30);
        assert_eq!(analytics.bars[2].value, 0);
    }

    #[test]
    fn test_zero_input_divides_by_one() {
        let mut state = AppState::default();
        state.job_cards = vec![job(0.0, 3.0)];
        assert_eq!(Analytics::compute(&state).yield_percent, 300);
    }

    #[test]
    fn test_kpis_count_open_work() {
        let mut state = AppState::default();
        state.dispatch_orders = vec![
            DispatchOrder {
                id: "DSP-1".to_string(),
                customer: "C".to_string(),
                vehicle: "MH12".to_string(),
                eta: "2026-01-01".to_string(),
                status: DispatchStatus::InTransit,
                tracking_note: None,
            },
            DispatchOrder {
                id: "DSP-2".to_string(),
                customer: "C".to_string(),
                vehicle: "MH12".to_string(),
                eta: "2026-01-01".to_string(),
                status: DispatchStatus::Delivered,
                tracking_note: None,
            },
        ];
        state.invoices = vec![Invoice {
            id: "INV-1".to_string(),
            customer: "C".to_string(),
            amount: 1200.5,
            due_date: "2026-01-01".to_string(),
            status: InvoiceStatus::Open,
        }];

        let kpis = Kpis::compute(&state);
        assert_eq!(kpis.dispatch_in_flight, 1);
        assert_eq!(kpis.open_invoices, 1);
        assert_eq!(Analytics::compute(&state).sales_billed, 1200.5);
    }
}
