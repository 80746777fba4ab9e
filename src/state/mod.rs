pub mod column;
pub mod ids;
pub mod messages;
pub mod mode;
pub mod paging;
pub mod reference;
pub mod rejection;
pub mod row;
pub mod table_state;
pub mod template;
pub mod type_editor;
pub mod upload;
