//! Persistent storage for the two interval durations.
//!
//! Uses the nRF52840's internal flash via `sequential-storage` crate
//! so the durations survive power cycles.
//!
//! Storage layout:
//!   - One map entry under `KEY_DURATIONS` holding the 12-byte record
//!     described in [`record`].
//!   - Flash pages are managed by `sequential-storage`, which handles
//!     wear levelling and GC.

pub mod record;

use crate::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use crate::controller::Durations;
use crate::error::Error;
use defmt::{error, info, warn};
use embedded_storage_async::nor_flash::NorFlash;
use record::RECORD_SIZE;

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Key for the duration record in the map storage.
const KEY_DURATIONS: u8 = 0x01;

/// Scratch buffer for `sequential-storage` (item header + record, word aligned).
const BUFFER_SIZE: usize = 64;

/// Duration record store backed by a flash region.
pub struct DurationStore<F> {
    flash: F,
}

impl<F: NorFlash> DurationStore<F> {
    pub const fn new(flash: F) -> Self {
        Self { flash }
    }

    /// Read the stored durations, falling back to the defaults.
    ///
    /// A missing, corrupted or unreadable record is not an error: the
    /// defaults are used and nothing is written back.
    pub async fn load(&mut self) -> Durations {
        let mut buf = [0u8; BUFFER_SIZE];

        let stored = match sequential_storage::map::fetch_item::<u8, &[u8], _>(
            &mut self.flash,
            STORAGE_START..STORAGE_END,
            &mut sequential_storage::cache::NoCache::new(),
            &mut buf,
            &KEY_DURATIONS,
        )
        .await
        {
            Ok(item) => item,
            Err(e) => {
                error!("Flash read error: {:?}", defmt::Debug2Format(&e));
                None
            }
        };

        let (durations, defaulted) = record::decode_or_default(stored);
        if defaulted {
            warn!("Flash holds no duration record, using defaults");
        } else {
            info!("Read durations from flash");
        }
        info!(
            "Durations in milliseconds WORK/PAUSE {}/{}",
            durations.long_ms, durations.short_ms
        );
        durations
    }

    /// Persist `durations`.
    pub async fn save(&mut self, durations: &Durations) -> Result<(), Error> {
        let mut buf = [0u8; BUFFER_SIZE];
        let data: [u8; RECORD_SIZE] = record::encode(durations);
        let item: &[u8] = &data;

        sequential_storage::map::store_item::<u8, &[u8], _>(
            &mut self.flash,
            STORAGE_START..STORAGE_END,
            &mut sequential_storage::cache::NoCache::new(),
            &mut buf,
            &KEY_DURATIONS,
            &item,
        )
        .await
        .map_err(|e| {
            error!("Flash write error: {:?}", defmt::Debug2Format(&e));
            Error::Storage
        })?;

        info!("Saved durations to flash");
        Ok(())
    }
}
