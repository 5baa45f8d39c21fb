fn main() {
    talentconnect::run();
}
