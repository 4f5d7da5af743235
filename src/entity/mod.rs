pub mod order_addresses;
pub mod order_items;
pub mod orders;
pub mod shipments;

pub use order_addresses::Entity as OrderAddresses;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use shipments::Entity as Shipments;
