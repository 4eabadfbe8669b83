pub mod particle_buffer;
