pub mod design_system;
pub mod incident_detail;
pub mod incidents_list;
pub mod toast;
