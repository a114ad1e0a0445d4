fn main() {
    hrdesk_frontend::run();
}
