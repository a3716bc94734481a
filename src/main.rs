fn main() -> anyhow::Result<()> {
    env_logger::init();
    markers_filter::run()
}
