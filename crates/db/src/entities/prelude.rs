//! Entity re-exports.

pub use super::admins::Entity as Admins;
pub use super::apbdes::Entity as Apbdes;
pub use super::dusun::Entity as Dusun;
pub use super::kependudukan::Entity as Kependudukan;
pub use super::letter_requests::Entity as LetterRequests;
pub use super::umkm::Entity as Umkm;
