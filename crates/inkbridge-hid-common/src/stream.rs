//! Opened input-report streams
//!
//! Device selection and opening belong to the acquisition layer. By the time
//! the bridge sees a device it is an [`InputReportStream`] that yields raw
//! report payloads until the device goes away.

use crate::{HidCommonError, HidCommonResult, HidDeviceInfo};
use async_trait::async_trait;

#[async_trait]
pub trait InputReportStream: Send {
    /// Next raw report. `Ok(None)` means the stream ended cleanly.
    async fn next_report(&mut self) -> HidCommonResult<Option<Vec<u8>>>;

    fn device_info(&self) -> &HidDeviceInfo;

    fn is_connected(&self) -> bool;
}

pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Scripted report stream. Clones share the same queue so a test can
    /// keep feeding reports after handing the stream to a pump.
    #[derive(Clone)]
    pub struct MockReportStream {
        info: HidDeviceInfo,
        queue: Arc<Mutex<VecDeque<Vec<u8>>>>,
        connected: Arc<Mutex<bool>>,
    }

    impl MockReportStream {
        pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
            Self {
                info: HidDeviceInfo::new(vendor_id, product_id, path),
                queue: Arc::new(Mutex::new(VecDeque::new())),
                connected: Arc::new(Mutex::new(true)),
            }
        }

        pub fn queue_report(&self, data: Vec<u8>) {
            let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
            queue.push_back(data);
        }

        pub fn pending(&self) -> usize {
            let queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
            queue.len()
        }

        pub fn disconnect(&self) {
            let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
            *connected = false;
        }
    }

    #[async_trait]
    impl InputReportStream for MockReportStream {
        async fn next_report(&mut self) -> HidCommonResult<Option<Vec<u8>>> {
            if !self.is_connected() {
                return Err(HidCommonError::Disconnected);
            }
            let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
            Ok(queue.pop_front())
        }

        fn device_info(&self) -> &HidDeviceInfo {
            &self.info
        }

        fn is_connected(&self) -> bool {
            *self.connected.lock().unwrap_or_else(|e| e.into_inner())
        }
    }
}
