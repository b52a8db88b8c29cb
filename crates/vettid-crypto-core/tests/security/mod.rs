mod debug_masking;
mod entropy_quality;
mod mlock_verification;
mod timing_sidechannel;
