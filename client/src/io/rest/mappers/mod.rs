pub mod attendance_mapper;
