//! Order tracking view.
//!
//! Projects an order's status onto the fixed five-step progress display shown
//! to customers. `Placed` and `Confirmed` are shown completed for any order
//! past them; payment confirmation is not tracked separately.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::aggregates::{Order, OrderStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingStep { Placed, Confirmed, Processing, Shipped, Delivered }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState { Completed, Current, Pending }

impl TrackingStep {
    pub const ALL: [TrackingStep; 5] = [Self::Placed, Self::Confirmed, Self::Processing, Self::Shipped, Self::Delivered];

    pub fn index(&self) -> usize {
        match self { Self::Placed => 0, Self::Confirmed => 1, Self::Processing => 2, Self::Shipped => 3, Self::Delivered => 4 }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Placed => "Order Placed",
            Self::Confirmed => "Payment Confirmed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Placed => "Your order has been successfully placed",
            Self::Confirmed => "Payment has been processed successfully",
            Self::Processing => "Your order is being prepared for shipment",
            Self::Shipped => "Your order is on its way",
            Self::Delivered => "Your order has been delivered",
        }
    }
}

/// Index of the in-progress step. `Pending` displays as `Processing`;
/// `Cancelled` has no position, so every step shows as pending.
pub fn current_step_index(status: OrderStatus) -> Option<usize> {
    let step = match status {
        OrderStatus::Pending | OrderStatus::Processing => TrackingStep::Processing,
        OrderStatus::Confirmed => TrackingStep::Confirmed,
        OrderStatus::Shipped => TrackingStep::Shipped,
        OrderStatus::Delivered => TrackingStep::Delivered,
        OrderStatus::Cancelled => return None,
    };
    Some(step.index())
}

pub fn step_state(step: TrackingStep, status: OrderStatus) -> StepState {
    match current_step_index(status) {
        Some(current) if step.index() < current => StepState::Completed,
        Some(current) if step.index() == current => StepState::Current,
        _ => StepState::Pending,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub step: TrackingStep,
    pub title: &'static str,
    pub description: &'static str,
    pub state: StepState,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTracking {
    pub order_id: String,
    pub status: OrderStatus,
    pub current_step: Option<usize>,
    pub steps: Vec<StepView>,
    pub estimated_delivery: DateTime<Utc>,
}

impl OrderTracking {
    pub fn for_order(order: &Order) -> Self {
        let steps = TrackingStep::ALL.iter()
            .map(|&step| StepView { step, title: step.title(), description: step.description(), state: step_state(step, order.status) })
            .collect();
        Self {
            order_id: order.id.clone(),
            status: order.status,
            current_step: current_step_index(order.status),
            steps,
            estimated_delivery: order.estimated_delivery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::order::sample;

    fn states(status: OrderStatus) -> Vec<StepState> {
        TrackingStep::ALL.iter().map(|&s| step_state(s, status)).collect()
    }

    #[test]
    fn test_pending_renders_as_processing() {
        assert_eq!(current_step_index(OrderStatus::Pending), Some(2));
        assert_eq!(states(OrderStatus::Pending), states(OrderStatus::Processing));
        assert_eq!(states(OrderStatus::Pending), vec![StepState::Completed, StepState::Completed, StepState::Current, StepState::Pending, StepState::Pending]);
    }

    #[test]
    fn test_delivered_marks_last_current() {
        let s = states(OrderStatus::Delivered);
        assert_eq!(s[4], StepState::Current);
        assert!(s[..4].iter().all(|&st| st == StepState::Completed));
    }

    #[test]
    fn test_cancelled_shows_all_pending() {
        assert_eq!(current_step_index(OrderStatus::Cancelled), None);
        assert!(states(OrderStatus::Cancelled).iter().all(|&st| st == StepState::Pending));
    }

    #[test]
    fn test_tracking_view() {
        let mut order = Order::create(sample("ada@example.com", "35.99"));
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        let view = OrderTracking::for_order(&order);
        assert_eq!(view.current_step, Some(3));
        assert_eq!(view.steps.len(), 5);
        assert_eq!(view.steps[3].title, "Shipped");
        assert_eq!(view.steps[3].state, StepState::Current);
        assert_eq!(view.estimated_delivery, order.estimated_delivery);
    }
}
