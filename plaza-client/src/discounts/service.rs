//! Discount service
//!
//! Thin orchestration over the REST collaborator: listings are filtered
//! through the derived buckets at read time, and submissions go through
//! draft validation before any network call is made.

use crate::discounts::status::{DiscountBucket, in_bucket};
use crate::discounts::validate::DiscountDraft;
use crate::error::EngineResult;
use crate::http::PlazaApi;
use chrono::Utc;
use shared::models::{Discount, DiscountUpdate};
use std::sync::Arc;
use tracing::info;

pub struct DiscountService {
    api: Arc<dyn PlazaApi>,
    business_id: String,
}

impl DiscountService {
    pub fn new(api: Arc<dyn PlazaApi>, business_id: impl Into<String>) -> Self {
        Self {
            api,
            business_id: business_id.into(),
        }
    }

    /// Discounts in `bucket`, evaluated against the current instant
    pub async fn list(&self, bucket: DiscountBucket) -> EngineResult<Vec<Discount>> {
        let now = Utc::now();
        let discounts = self.api.list_discounts(&self.business_id).await?;
        Ok(discounts
            .into_iter()
            .filter(|d| in_bucket(d, bucket, now))
            .collect())
    }

    /// Validate a draft and persist it as a new discount
    pub async fn submit(&self, draft: DiscountDraft) -> EngineResult<Discount> {
        let payload = draft.into_create()?;
        let discount = self.api.create_discount(&payload).await?;
        info!(discount_id = %discount.id, "Created discount");
        Ok(discount)
    }

    /// Apply a partial update to an existing discount
    pub async fn update(
        &self,
        discount_id: &str,
        payload: DiscountUpdate,
    ) -> EngineResult<Discount> {
        let discount = self.api.update_discount(discount_id, &payload).await?;
        info!(discount_id = %discount.id, "Updated discount");
        Ok(discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discounts::working_set::WorkingSet;
    use crate::error::EngineError;
    use async_trait::async_trait;
    use chrono::Duration;
    use parking_lot::Mutex;
    use shared::models::{
        DiscountCreate, DiscountStatus, Order, OrderStatus, PaymentStatus, ProductInfo,
        VerifyArrivalResponse,
    };

    struct FakeApi {
        discounts: Mutex<Vec<Discount>>,
        create_calls: Mutex<u32>,
    }

    impl FakeApi {
        fn with_discounts(discounts: Vec<Discount>) -> Arc<Self> {
            Arc::new(Self {
                discounts: Mutex::new(discounts),
                create_calls: Mutex::new(0),
            })
        }
    }

    #[async_trait]
    impl PlazaApi for FakeApi {
        async fn fetch_orders(&self, _business_id: &str) -> EngineResult<Vec<Order>> {
            unimplemented!("not used by discount tests")
        }

        async fn set_order_status(
            &self,
            _order_id: &str,
            _status: OrderStatus,
        ) -> EngineResult<Order> {
            unimplemented!("not used by discount tests")
        }

        async fn set_payment_status(
            &self,
            _order_id: &str,
            _payment_status: PaymentStatus,
        ) -> EngineResult<Order> {
            unimplemented!("not used by discount tests")
        }

        async fn verify_arrival(
            &self,
            _business_id: &str,
            _code: &str,
        ) -> EngineResult<VerifyArrivalResponse> {
            unimplemented!("not used by discount tests")
        }

        async fn list_discounts(&self, _business_id: &str) -> EngineResult<Vec<Discount>> {
            Ok(self.discounts.lock().clone())
        }

        async fn create_discount(&self, payload: &DiscountCreate) -> EngineResult<Discount> {
            *self.create_calls.lock() += 1;
            let discount = Discount {
                id: "disc-new".to_string(),
                business_id: payload.business_id.clone(),
                name: payload.name.clone(),
                description: payload.description.clone(),
                start_datetime: payload.start_datetime,
                end_datetime: payload.end_datetime,
                status: DiscountStatus::Active,
                applicable_products: payload.applicable_products.clone(),
            };
            self.discounts.lock().push(discount.clone());
            Ok(discount)
        }

        async fn update_discount(
            &self,
            discount_id: &str,
            payload: &DiscountUpdate,
        ) -> EngineResult<Discount> {
            let mut discounts = self.discounts.lock();
            let discount = discounts
                .iter_mut()
                .find(|d| d.id == discount_id)
                .ok_or_else(|| EngineError::LookupNotFound(discount_id.to_string()))?;
            if let Some(status) = payload.status {
                discount.status = status;
            }
            if let Some(name) = &payload.name {
                discount.name = name.clone();
            }
            Ok(discount.clone())
        }
    }

    fn make_discount(id: &str, status: DiscountStatus, days_until_end: i64) -> Discount {
        Discount {
            id: id.to_string(),
            business_id: "biz-1".to_string(),
            name: format!("Discount {id}"),
            description: None,
            start_datetime: Utc::now() - Duration::days(7),
            end_datetime: Some(Utc::now() + Duration::days(days_until_end)),
            status,
            applicable_products: vec![],
        }
    }

    fn valid_draft() -> DiscountDraft {
        let mut working_set = WorkingSet::from_products(&[ProductInfo {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            original_price: 100.0,
            current_stock: 10,
        }]);
        working_set.get_mut("p1").unwrap().price.set_percentage(20.0);
        DiscountDraft {
            business_id: "biz-1".to_string(),
            name: "Autumn sale".to_string(),
            description: None,
            start_datetime: Utc::now(),
            end_datetime: Some(Utc::now() + Duration::days(30)),
            working_set,
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_bucket() {
        let api = FakeApi::with_discounts(vec![
            make_discount("live", DiscountStatus::Active, 7),
            make_discount("over", DiscountStatus::Active, -1),
            make_discount("off", DiscountStatus::Paused, 7),
        ]);
        let service = DiscountService::new(api, "biz-1");

        let ongoing = service.list(DiscountBucket::Ongoing).await.unwrap();
        assert_eq!(ongoing.len(), 1);
        assert_eq!(ongoing[0].id, "live");

        let expired = service.list(DiscountBucket::Expired).await.unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, "over");

        assert_eq!(service.list(DiscountBucket::All).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_submit_persists_valid_draft() {
        let api = FakeApi::with_discounts(vec![]);
        let service = DiscountService::new(api.clone(), "biz-1");

        let created = service.submit(valid_draft()).await.unwrap();
        assert_eq!(created.applicable_products[0].discounted_price, 80.00);
        assert_eq!(*api.create_calls.lock(), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_hits_network() {
        let api = FakeApi::with_discounts(vec![]);
        let service = DiscountService::new(api.clone(), "biz-1");

        let mut draft = valid_draft();
        draft.name = String::new();

        let result = service.submit(draft).await;
        assert!(matches!(result, Err(EngineError::Validation(_))));
        assert_eq!(*api.create_calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_update_pauses_discount() {
        let api = FakeApi::with_discounts(vec![make_discount("d1", DiscountStatus::Active, 7)]);
        let service = DiscountService::new(api, "biz-1");

        let updated = service
            .update(
                "d1",
                DiscountUpdate {
                    status: Some(DiscountStatus::Paused),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, DiscountStatus::Paused);
    }
}
