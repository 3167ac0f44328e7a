//! Repository traits for the POS flows
//!
//! The flows never read catalog or order data from ambient module
//! state; everything arrives through these traits so any data source
//! can back them and tests can use fakes.

use async_trait::async_trait;
use stepflow_core::FlowError;

use crate::catalog::{Order, OrderId, Product, ProductId, ServiceItem};
use crate::customer::CustomerRecord;

/// Repository for registered members
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Look up a member by phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<CustomerRecord>, FlowError>;
}

/// Repository for retail products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List the products on sale
    async fn list(&self) -> Result<Vec<Product>, FlowError>;

    /// Find a product by ID
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, FlowError>;
}

/// Repository for cleaning services
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// List the services the shop offers
    async fn list(&self) -> Result<Vec<ServiceItem>, FlowError>;
}

/// Repository for finalized orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save an order, replacing any previous version
    async fn save(&self, order: &Order) -> Result<(), FlowError>;

    /// Find an order by ID
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, FlowError>;

    /// List all orders, newest first
    async fn list(&self) -> Result<Vec<Order>, FlowError>;
}

/// Memory implementations for testing
#[cfg(feature = "testing")]
pub mod memory {
    use super::*;
    use crate::catalog::ServiceId;
    use crate::customer::CustomerId;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory customer repository
    pub struct MemoryCustomerRepository {
        customers: Vec<CustomerRecord>,
    }

    impl MemoryCustomerRepository {
        /// Create an empty repository
        pub fn new(customers: Vec<CustomerRecord>) -> Self {
            Self { customers }
        }

        /// Create a repository seeded with sample members
        pub fn with_samples() -> Self {
            Self::new(vec![
                CustomerRecord {
                    id: CustomerId("cust-1".to_string()),
                    phone: "9911-2345".to_string(),
                    name: "Bat".to_string(),
                    points_balance: 12_000,
                },
                CustomerRecord {
                    id: CustomerId("cust-2".to_string()),
                    phone: "8800-1111".to_string(),
                    name: "Saruul".to_string(),
                    points_balance: 150_000,
                },
            ])
        }
    }

    #[async_trait]
    impl CustomerRepository for MemoryCustomerRepository {
        async fn find_by_phone(&self, phone: &str) -> Result<Option<CustomerRecord>, FlowError> {
            Ok(self.customers.iter().find(|c| c.phone == phone).cloned())
        }
    }

    /// In-memory product repository
    pub struct MemoryProductRepository {
        products: Vec<Product>,
    }

    impl MemoryProductRepository {
        /// Create a repository over the given products
        pub fn new(products: Vec<Product>) -> Self {
            Self { products }
        }

        /// Create a repository seeded with sample products
        pub fn with_samples() -> Self {
            Self::new(vec![
                Product {
                    id: ProductId("prod-1".to_string()),
                    name: "Shoe polish".to_string(),
                    unit_price: 8_000,
                    stock: 24,
                },
                Product {
                    id: ProductId("prod-2".to_string()),
                    name: "Premium laces".to_string(),
                    unit_price: 5_000,
                    stock: 40,
                },
                Product {
                    id: ProductId("prod-3".to_string()),
                    name: "Leather insoles".to_string(),
                    unit_price: 12_000,
                    stock: 15,
                },
            ])
        }
    }

    #[async_trait]
    impl ProductRepository for MemoryProductRepository {
        async fn list(&self) -> Result<Vec<Product>, FlowError> {
            Ok(self.products.clone())
        }

        async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, FlowError> {
            Ok(self.products.iter().find(|p| p.id == *id).cloned())
        }
    }

    /// In-memory service repository
    pub struct MemoryServiceRepository {
        services: Vec<ServiceItem>,
    }

    impl MemoryServiceRepository {
        /// Create a repository over the given services
        pub fn new(services: Vec<ServiceItem>) -> Self {
            Self { services }
        }

        /// Create a repository seeded with sample services
        pub fn with_samples() -> Self {
            Self::new(vec![
                ServiceItem {
                    id: ServiceId("svc-1".to_string()),
                    name: "Shoe deep clean".to_string(),
                    unit_price: 25_000,
                },
                ServiceItem {
                    id: ServiceId("svc-2".to_string()),
                    name: "Leather care".to_string(),
                    unit_price: 15_000,
                },
                ServiceItem {
                    id: ServiceId("svc-3".to_string()),
                    name: "Suede restoration".to_string(),
                    unit_price: 45_000,
                },
            ])
        }
    }

    #[async_trait]
    impl ServiceRepository for MemoryServiceRepository {
        async fn list(&self) -> Result<Vec<ServiceItem>, FlowError> {
            Ok(self.services.clone())
        }
    }

    /// In-memory order repository
    pub struct MemoryOrderRepository {
        orders: Arc<RwLock<HashMap<String, Order>>>,
    }

    impl MemoryOrderRepository {
        /// Create an empty repository
        pub fn new() -> Self {
            Self {
                orders: Arc::new(RwLock::new(HashMap::new())),
            }
        }
    }

    impl Default for MemoryOrderRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl OrderRepository for MemoryOrderRepository {
        async fn save(&self, order: &Order) -> Result<(), FlowError> {
            let mut orders = self.orders.write().await;
            orders.insert(order.id.0.clone(), order.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, FlowError> {
            let orders = self.orders.read().await;
            Ok(orders.get(&id.0).cloned())
        }

        async fn list(&self) -> Result<Vec<Order>, FlowError> {
            let orders = self.orders.read().await;
            let mut all: Vec<Order> = orders.values().cloned().collect();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(all)
        }
    }
}
