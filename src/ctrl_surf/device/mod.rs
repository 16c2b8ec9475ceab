pub mod xtouch_mini;
