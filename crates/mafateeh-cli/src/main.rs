fn main() {
    mafateeh_cli::run_main();
}
