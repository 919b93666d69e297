//! Identifiers of the well known `ilst` entries
//!
//! Every identifier here is part of the [`StandardCatalogue`](super::StandardCatalogue), with the
//! shape listed in its documentation.

use super::ident::AtomIdent;
use super::value::ValueShape;

pub(crate) const WELL_KNOWN_TYPE_SET: u8 = 0;

macro_rules! standard_identifiers {
	($($(#[$meta:meta])* $name:ident => $fourcc:literal, $shape:ident;)+) => {
		$(
			$(#[$meta])*
			#[doc = ""]
			#[doc = concat!("Shape: [`ValueShape::", stringify!($shape), "`]")]
			pub const $name: AtomIdent<'_> = AtomIdent::Fourcc(*$fourcc);
		)+

		pub(crate) const STANDARD_SHAPES: &[([u8; 4], ValueShape)] = &[
			$((*$fourcc, ValueShape::$shape),)+
		];
	};
}

standard_identifiers! {
	// Text
	/// Title (`©nam`)
	TITLE => b"\xA9nam", String;
	/// Artist (`©ART`)
	ARTIST => b"\xA9ART", String;
	/// Album artist (`aART`)
	ALBUM_ARTIST => b"aART", String;
	/// Album (`©alb`)
	ALBUM => b"\xA9alb", String;
	/// Genre (`©gen`)
	GENRE => b"\xA9gen", String;
	/// Comment (`©cmt`)
	COMMENT => b"\xA9cmt", String;
	/// Composer (`©wrt`)
	COMPOSER => b"\xA9wrt", String;
	/// Recording date (`©day`)
	YEAR => b"\xA9day", String;
	/// Encoding tool (`©too`)
	ENCODER => b"\xA9too", String;
	/// Encoded by (`©enc`)
	ENCODED_BY => b"\xA9enc", String;
	/// Grouping (`©grp`)
	GROUPING => b"\xA9grp", String;
	/// Lyrics (`©lyr`)
	LYRICS => b"\xA9lyr", String;
	/// Copyright (`cprt`)
	COPYRIGHT => b"cprt", String;
	/// Description (`desc`)
	DESCRIPTION => b"desc", String;
	/// Long description (`ldes`)
	LONG_DESCRIPTION => b"ldes", String;
	/// Work (`©wrk`)
	WORK => b"\xA9wrk", String;
	/// Movement (`©mvn`)
	MOVEMENT => b"\xA9mvn", String;
	/// Title sort order (`sonm`)
	TITLE_SORT => b"sonm", String;
	/// Artist sort order (`soar`)
	ARTIST_SORT => b"soar", String;
	/// Album sort order (`soal`)
	ALBUM_SORT => b"soal", String;
	/// Album artist sort order (`soaa`)
	ALBUM_ARTIST_SORT => b"soaa", String;
	/// Composer sort order (`soco`)
	COMPOSER_SORT => b"soco", String;
	/// Podcast URL (`purl`)
	PODCAST_URL => b"purl", String;
	/// Podcast episode GUID (`egid`)
	PODCAST_GUID => b"egid", String;
	/// Podcast category (`catg`)
	PODCAST_CATEGORY => b"catg", String;
	/// Podcast keywords (`keyw`)
	PODCAST_KEYWORDS => b"keyw", String;
	/// TV show (`tvsh`)
	TV_SHOW => b"tvsh", String;
	/// TV network (`tvnn`)
	TV_NETWORK => b"tvnn", String;
	/// TV episode ID (`tven`)
	TV_EPISODE_ID => b"tven", String;

	// Pairs
	/// Track number and total (`trkn`)
	TRACK => b"trkn", Pair;
	/// Disc number and total (`disk`)
	DISK => b"disk", Pair;

	// Integers
	/// Beats per minute (`tmpo`)
	BPM => b"tmpo", UInt16;
	/// Movement count (`©mvc`)
	MOVEMENT_COUNT => b"\xA9mvc", UInt16;
	/// Movement number (`©mvi`)
	MOVEMENT_NUMBER => b"\xA9mvi", UInt16;
	/// Legacy ID3v1 genre index (`gnre`)
	GENRE_ID => b"gnre", UInt16;
	/// Compilation flag (`cpil`)
	COMPILATION => b"cpil", UInt8;
	/// Gapless playback flag (`pgap`)
	GAPLESS => b"pgap", UInt8;
	/// Podcast flag (`pcst`)
	PODCAST => b"pcst", UInt8;
	/// Show work and movement flag (`shwm`)
	SHOW_WORK => b"shwm", UInt8;
	/// HD video flag (`hdvd`)
	HD_VIDEO => b"hdvd", UInt8;
	/// Advisory rating (`rtng`)
	ADVISORY_RATING => b"rtng", UInt8;
	/// Media type (`stik`)
	MEDIA_TYPE => b"stik", UInt8;
	/// TV season (`tvsn`)
	TV_SEASON => b"tvsn", UInt32;
	/// TV episode (`tves`)
	TV_EPISODE => b"tves", UInt32;
	/// iTunes catalog ID (`cnID`)
	CATALOG_ID => b"cnID", UInt32;
	/// iTunes artist ID (`atID`)
	ARTIST_ID => b"atID", UInt32;
	/// iTunes genre ID (`geID`)
	GENRE_ID_ITUNES => b"geID", UInt32;
	/// iTunes composer ID (`cmID`)
	COMPOSER_ID => b"cmID", UInt32;
	/// iTunes country code (`sfID`)
	STOREFRONT_ID => b"sfID", UInt32;
	/// iTunes album ID (`plID`)
	ALBUM_ID => b"plID", UInt64;

	// Images
	/// Cover art (`covr`)
	COVER_ART => b"covr", Image;
}
