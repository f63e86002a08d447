fn main() {
    vr_blaster::game::run();
}
