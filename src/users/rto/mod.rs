pub mod registered_user_rto;
