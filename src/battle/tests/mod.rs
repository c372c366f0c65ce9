mod common;
mod test_fainting;
mod test_stat_stages;
