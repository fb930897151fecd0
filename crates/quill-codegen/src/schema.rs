mod column;
pub(crate) use column::Column;

mod entity;
pub(crate) use entity::Entity;

mod entity_attr;
pub(crate) use entity_attr::EntityAttr;

mod enumeration;
pub(crate) use enumeration::{Enumeration, Variant};

mod error;
pub(crate) use error::ErrorSet;

mod member;
pub(crate) use member::{Member, MemberAttr};
