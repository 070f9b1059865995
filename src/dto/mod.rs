pub mod maintenance_dto;
pub mod route_dto;
pub mod vehicle_dto;
